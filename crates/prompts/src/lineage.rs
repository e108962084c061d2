//! Prior-content assembly along a node's ancestry.

use trellis_core::journey::{Journey, LearningNode, NodeContent, NodeKey};

use crate::assets::describe_visual_assets;
use crate::markup::strip_markup;

/// Concatenate the generated content of `start` and all its ancestors,
/// root first.
///
/// Nodes without content are skipped. Blocks are joined with a newline;
/// since each block ends in one, they read as separated by a blank line.
/// Returns an empty string when no node on the path has content.
pub fn lineage_content(journey: &Journey, start: NodeKey) -> String {
    let mut blocks: Vec<String> = journey
        .ancestors(start)
        .filter_map(|(_, node)| node.content().map(|content| render_block(node, content)))
        .collect();
    // Collected leaf first.
    blocks.reverse();
    blocks.join("\n")
}

fn render_block(node: &LearningNode, content: &NodeContent) -> String {
    let mut block = format!("--- Content for: \"{}\" ---\n", node.full_title());

    block.push_str(&strip_markup(&content.overview));
    block.push_str("\n\n");

    if !content.definitions.is_empty() {
        block.push_str("Key Terms Defined:\n");
        for def in &content.definitions {
            block.push_str(&format!("- {}: {}\n", def.term, def.definition));
        }
        block.push('\n');
    }

    block.push_str(&describe_visual_assets(content.visual_assets.as_deref()));
    block
}
