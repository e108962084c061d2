//! Upstream completion transport for Trellis.
//!
//! The gateway only ever talks to one kind of backend: an OpenAI-compatible
//! `/chat/completions` endpoint. [`OpenAiCompatProvider`] implements
//! `trellis_core::Provider` for it.

pub mod openai_compat;

pub use openai_compat::{OpenAiCompatProvider, build_from_config};
