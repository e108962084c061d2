//! The shared context block embedded in every journey-aware prompt.

use trellis_core::error::JourneyError;
use trellis_core::journey::Journey;

use crate::lineage::lineage_content;
use crate::tree::render_tree;

/// The five values every task template is built around.
///
/// Built fresh per prompt; nothing here is cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptContext {
    /// Title of the journey's overall topic.
    pub topic_title: String,
    /// Audience level, passed through verbatim (e.g. "beginner").
    pub sophistication: String,
    /// Title of the node the user is at.
    pub current_node_title: String,
    /// Output of [`render_tree`] for the whole journey.
    pub journey_structure: String,
    /// Output of [`lineage_content`] for the current node.
    pub lineage_content: String,
}

impl PromptContext {
    /// Derive the context for the node with id `current_id`.
    ///
    /// The journey map is rendered from the root and the prior content is
    /// collected along the current node's ancestry.
    pub fn for_node(
        journey: &Journey,
        topic_title: impl Into<String>,
        sophistication: impl Into<String>,
        current_id: &str,
    ) -> Result<Self, JourneyError> {
        let current = journey.require(current_id)?;
        let current_node_title = journey
            .get(current)
            .map(|n| n.full_title().to_string())
            .unwrap_or_default();

        Ok(Self {
            topic_title: topic_title.into(),
            sophistication: sophistication.into(),
            current_node_title,
            journey_structure: render_tree(journey, journey.root(), current_id),
            lineage_content: lineage_content(journey, current),
        })
    }

    /// Same values, different topic title. The timeline template frames the
    /// context around the overall topic rather than the journey title.
    pub fn with_topic(&self, topic_title: impl Into<String>) -> Self {
        Self {
            topic_title: topic_title.into(),
            ..self.clone()
        }
    }
}

/// Render the `CONTEXT:` block. Values are embedded verbatim, without
/// escaping.
pub fn shared_context_block(ctx: &PromptContext) -> String {
    format!(
        r#"CONTEXT:
The user is learning about the topic of "{topic}" at a "{level}" level. They are currently at the node titled "{current}".

Here is the user's complete learning journey so far:
--- JOURNEY MAP ---
{structure}
--- END JOURNEY MAP ---

Here is the full content for the topics leading directly to the user's current position:
--- PRIOR CONTENT ---
{lineage}
--- END PRIOR CONTENT ---"#,
        topic = ctx.topic_title,
        level = ctx.sophistication,
        current = ctx.current_node_title,
        structure = ctx.journey_structure,
        lineage = ctx.lineage_content,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::journey::{Definition, NodeContent};

    fn algebra() -> Journey {
        let mut j = Journey::new("alg", "Algebra");
        let root = j.root();
        let lin = j.add_child(root, "lin", "Linear Equations").unwrap();
        j.get_mut(lin).unwrap().set_content(NodeContent {
            overview: "Lines...".into(),
            definitions: vec![Definition::new("slope", "rate of change")],
            visual_assets: None,
        });
        j
    }

    #[test]
    fn block_embeds_all_values_between_delimiters() {
        let ctx = PromptContext {
            topic_title: "Algebra".into(),
            sophistication: "beginner".into(),
            current_node_title: "Slope".into(),
            journey_structure: "- Algebra\n".into(),
            lineage_content: "prior".into(),
        };
        let block = shared_context_block(&ctx);
        assert!(block.starts_with("CONTEXT:\nThe user is learning about the topic of \"Algebra\" at a \"beginner\" level. They are currently at the node titled \"Slope\"."));
        assert!(block.contains("--- JOURNEY MAP ---\n- Algebra\n\n--- END JOURNEY MAP ---"));
        assert!(block.ends_with("--- PRIOR CONTENT ---\nprior\n--- END PRIOR CONTENT ---"));
    }

    #[test]
    fn values_embedded_verbatim() {
        let ctx = PromptContext {
            topic_title: "\"quoted\" --- END JOURNEY MAP ---".into(),
            ..PromptContext::default()
        };
        assert!(shared_context_block(&ctx).contains("\"\"quoted\" --- END JOURNEY MAP ---\""));
    }

    #[test]
    fn for_node_builds_tree_and_lineage() {
        let j = algebra();
        let ctx = PromptContext::for_node(&j, "Algebra", "beginner", "lin").unwrap();
        assert_eq!(ctx.current_node_title, "Linear Equations");
        assert_eq!(
            ctx.journey_structure,
            "- Algebra\n  - Linear Equations <-- (You are here)\n"
        );
        assert!(ctx.lineage_content.starts_with("--- Content for: \"Linear Equations\" ---\nLines..."));
        assert!(ctx.lineage_content.contains("- slope: rate of change"));
    }

    #[test]
    fn for_unknown_node_errors() {
        let j = algebra();
        assert_eq!(
            PromptContext::for_node(&j, "Algebra", "beginner", "missing"),
            Err(JourneyError::UnknownId("missing".into()))
        );
    }

    #[test]
    fn with_topic_only_changes_topic() {
        let j = algebra();
        let ctx = PromptContext::for_node(&j, "Algebra", "expert", "lin").unwrap();
        let retitled = ctx.with_topic("History of Algebra");
        assert_eq!(retitled.topic_title, "History of Algebra");
        assert_eq!(retitled.journey_structure, ctx.journey_structure);
        assert_eq!(retitled.sophistication, "expert");
    }
}
