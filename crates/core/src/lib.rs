//! # Trellis Core
//!
//! Domain types, traits, and error definitions for the Trellis
//! learning-journey backend. This crate has **no framework dependencies**:
//! it defines the model that the prompt assembler, the upstream transport
//! and the HTTP gateway are all written against.
//!
//! - [`journey`]: the learning-journey tree and per-node content
//! - [`visual`]: visual asset descriptors attached to generated content
//! - [`message`]: chat messages forwarded to the completion API
//! - [`provider`]: the upstream completion transport abstraction

pub mod error;
pub mod journey;
pub mod message;
pub mod provider;
pub mod visual;

// Re-export key types at crate root for ergonomics
pub use error::{JourneyError, ProviderError};
pub use journey::{Definition, Journey, LearningNode, NodeContent, NodeKey, NodeOutline};
pub use message::{ChatMessage, ChatPayload, Role};
pub use provider::{CompletionRequest, Provider};
pub use visual::{TimelineItem, VisualAsset};
