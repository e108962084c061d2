//! Prompt assembly for Trellis learning journeys.
//!
//! Turns in-memory journey state into the prompt strings the calling
//! application sends through the gateway:
//!
//! 1. **Journey map** ([`tree`]): the whole tree, current node marked
//! 2. **Prior content** ([`lineage`]): generated content of every ancestor,
//!    root first, with markup stripped ([`markup`]) and visual aids
//!    described ([`assets`])
//! 3. **Shared context** ([`context`]): the block every task prompt embeds
//! 4. **Task templates** ([`templates`]): one function per LLM task
//!
//! [`contract`] holds typed models of the JSON the templates ask the LLM to
//! return.
//!
//! Everything here is pure: same inputs, same string, no I/O.

pub mod assets;
pub mod context;
pub mod contract;
pub mod lineage;
pub mod markup;
pub mod templates;
pub mod tree;

pub use assets::describe_visual_assets;
pub use context::{PromptContext, shared_context_block};
pub use contract::{
    ContentResponse, Dispatch, DispatchResponse, Placement, PromptError, ResponseType,
    SyllabusResponse, extract_code_block, parse_json, parse_numbered_list,
};
pub use lineage::lineage_content;
pub use markup::strip_markup;
pub use tree::render_tree;
