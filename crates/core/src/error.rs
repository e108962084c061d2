//! Error types for the Trellis domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum.

use thiserror::Error;

/// Failures talking to the upstream completion API.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The upstream answered with a non-2xx status. `message` is the
    /// nested `error.message` from the upstream body when one was present.
    #[error("API request failed with status {status_code}: {}", message.as_deref().unwrap_or("<no message>"))]
    ApiError {
        status_code: u16,
        message: Option<String>,
    },

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response body: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// The message the upstream itself reported, if any.
    ///
    /// Transport-level failures (timeouts, refused connections, garbage
    /// bodies) never carry one.
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            Self::ApiError { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JourneyError {
    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    #[error("Unknown node id: {0}")]
    UnknownId(String),
}
