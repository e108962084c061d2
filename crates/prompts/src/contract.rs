//! Typed models of the replies the task templates ask for.
//!
//! LLMs do not always follow the "no text before or after the JSON" rule,
//! so [`parse_json`] tolerates Markdown fences and leading chatter.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use trellis_core::journey::{Definition, NodeContent};
use trellis_core::visual::VisualAsset;

/// Errors raised while interpreting an LLM reply.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("Reply is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Reply has an unexpected shape: {0}")]
    InvalidContent(String),

    #[error("Reply contains no {0} code block")]
    NoCodeBlock(String),
}

// ── Node content ──────────────────────────────────────────────

/// Reply to the elaboration templates and the `content` of an explanation
/// dispatch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentResponse {
    pub explanation: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub visual_assets: Option<Vec<VisualAsset>>,
}

impl ContentResponse {
    pub fn into_node_content(self) -> NodeContent {
        NodeContent {
            overview: self.explanation,
            definitions: self.definitions,
            visual_assets: self.visual_assets,
        }
    }
}

// ── Syllabus ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusResponse {
    pub category: String,
    pub syllabus: String,
    #[serde(default)]
    pub visual_assets: Option<Vec<VisualAsset>>,
}

impl SyllabusResponse {
    /// Module titles from the numbered syllabus string.
    pub fn modules(&self) -> Vec<String> {
        parse_numbered_list(&self.syllabus)
    }
}

// ── Question dispatch ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Explanation,
    Subtopics,
}

/// Where an explanation answer should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Placement {
    /// Appended to the current node.
    Inline,
    /// Added as a new child node.
    NewNode,
}

/// Raw reply to the question dispatcher. `content` depends on
/// `response_type`, so it is kept untyped until [`into_decision`].
///
/// [`into_decision`]: DispatchResponse::into_decision
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResponse {
    pub response_type: ResponseType,
    #[serde(default)]
    pub location: Option<Placement>,
    pub content: serde_json::Value,
}

/// A dispatcher reply with its content resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    Explanation {
        location: Option<Placement>,
        content: ContentResponse,
    },
    Subtopics {
        syllabus: Vec<String>,
    },
}

#[derive(Deserialize)]
struct SubtopicsContent {
    syllabus: String,
}

impl DispatchResponse {
    pub fn into_decision(self) -> Result<Dispatch, PromptError> {
        match self.response_type {
            ResponseType::Explanation => {
                let content: ContentResponse = serde_json::from_value(self.content)
                    .map_err(|e| PromptError::InvalidContent(e.to_string()))?;
                Ok(Dispatch::Explanation {
                    location: self.location,
                    content,
                })
            }
            ResponseType::Subtopics => {
                let content: SubtopicsContent = serde_json::from_value(self.content)
                    .map_err(|e| PromptError::InvalidContent(e.to_string()))?;
                Ok(Dispatch::Subtopics {
                    syllabus: parse_numbered_list(&content.syllabus),
                })
            }
        }
    }
}

// ── Parsing helpers ───────────────────────────────────────────

static JSON_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json|JSON)?\s*\n(.*?)\n?\s*```").expect("static pattern")
});

static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+[.)]\s*(.+?)\s*$").expect("static pattern"));

/// Parse a JSON reply into `T`.
///
/// Tries, in order: the whole reply, the body of the first fenced block,
/// and the span from the first `{` to the last `}`.
pub fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T, PromptError> {
    let trimmed = raw.trim();
    let first_err = match serde_json::from_str(trimmed) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    if let Some(body) = JSON_FENCE.captures(trimmed).and_then(|c| c.get(1)) {
        if let Ok(value) = serde_json::from_str(body.as_str()) {
            return Ok(value);
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            return serde_json::from_str(&trimmed[start..=end])
                .map_err(|e| PromptError::InvalidJson(e.to_string()));
        }
    }

    Err(PromptError::InvalidJson(first_err.to_string()))
}

/// Body of the first fenced code block tagged `lang`.
pub fn extract_code_block(raw: &str, lang: &str) -> Result<String, PromptError> {
    let open = format!("```{lang}");
    let start = raw
        .find(&open)
        .map(|i| i + open.len())
        .ok_or_else(|| PromptError::NoCodeBlock(lang.to_string()))?;
    let rest = &raw[start..];
    let end = rest
        .find("```")
        .ok_or_else(|| PromptError::NoCodeBlock(lang.to_string()))?;
    Ok(rest[..end].trim().to_string())
}

/// Titles from a `1. Title` / `2) Title` list, one per line. Lines that are
/// not numbered are ignored.
pub fn parse_numbered_list(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| NUMBERED_ITEM.captures(line))
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect()
}
