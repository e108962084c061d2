//! Chat message types.
//!
//! These are the values the calling application sends to `POST /api/chat`
//! and that are forwarded, unchanged, to the upstream completion API.

use serde::{Deserialize, Serialize};

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions
    System,
    /// Developer instructions (newer OpenAI models)
    Developer,
    /// The end user
    User,
    /// The AI assistant
    Assistant,
    /// Tool execution result
    Tool,
}

/// A single role/content pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// The body of a chat request: an ordered message sequence plus the
/// routing key that selects an upstream route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatPayload {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_without_purpose() {
        let payload: ChatPayload =
            serde_json::from_str(r#"{"messages":[{"role":"user","content":"hi"}]}"#).unwrap();
        assert_eq!(payload.messages, vec![ChatMessage::user("hi")]);
        assert!(payload.purpose.is_none());
    }

    #[test]
    fn payload_with_purpose() {
        let payload: ChatPayload = serde_json::from_str(
            r#"{"messages":[{"role":"system","content":"s"}],"purpose":"graph_lab"}"#,
        )
        .unwrap();
        assert_eq!(payload.purpose.as_deref(), Some("graph_lab"));
        assert_eq!(payload.messages[0].role, Role::System);
    }

    #[test]
    fn missing_messages_defaults_to_empty() {
        let payload: ChatPayload = serde_json::from_str(r#"{"purpose":"x"}"#).unwrap();
        assert!(payload.messages.is_empty());
    }

    #[test]
    fn unknown_role_rejected() {
        let result: Result<ChatPayload, _> =
            serde_json::from_str(r#"{"messages":[{"role":"narrator","content":"x"}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::assistant("ok")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"ok"}"#);
    }
}
