//! Provider trait: the abstraction over the upstream completion API.
//!
//! A Provider knows how to deliver a `{ model, messages }` body to an
//! OpenAI-compatible chat completion endpoint and hand back whatever JSON
//! the upstream returned. It does not interpret the completion: the gateway
//! relays the body verbatim.
//!
//! Implementations: the reqwest transport in `trellis-providers`, and
//! recording mocks in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::message::ChatMessage;

/// The exact body sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model to use (e.g., "gpt-4.1")
    pub model: String,

    /// The conversation messages, in caller order
    pub messages: Vec<ChatMessage>,
}

/// The core Provider trait.
///
/// The credential is passed per call so that the gateway, which owns the
/// injected configuration, decides whether a call may be made at all.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and return the upstream JSON body.
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> std::result::Result<serde_json::Value, ProviderError>;
}
