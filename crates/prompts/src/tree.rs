//! Journey map rendering.

use trellis_core::journey::{Journey, NodeKey};

/// Marker appended to the line of the user's current node.
pub const CURRENT_MARKER: &str = " <-- (You are here)";

/// Render the subtree under `root` as an indented outline, one line per
/// node, children in stored order. The node whose id equals `current_id`
/// gets [`CURRENT_MARKER`].
///
/// ```text
/// - Algebra
///   - Linear Equations <-- (You are here)
/// ```
pub fn render_tree(journey: &Journey, root: NodeKey, current_id: &str) -> String {
    let mut out = String::new();
    for (key, depth) in journey.depth_first(root) {
        let Some(node) = journey.get(key) else {
            continue;
        };
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str("- ");
        out.push_str(node.full_title());
        if node.id() == current_id {
            out.push_str(CURRENT_MARKER);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_level_tree_marks_current() {
        let mut j = Journey::new("alg", "Algebra");
        let root = j.root();
        j.add_child(root, "lin", "Linear Equations").unwrap();
        assert_eq!(
            render_tree(&j, root, "lin"),
            "- Algebra\n  - Linear Equations <-- (You are here)\n"
        );
    }

    #[test]
    fn single_node_tree() {
        let j = Journey::new("solo", "Topology");
        assert_eq!(render_tree(&j, j.root(), "other"), "- Topology\n");
    }

    #[test]
    fn depth_first_in_stored_order_with_exactly_one_marker() {
        let mut j = Journey::new("r", "Physics");
        let root = j.root();
        let mech = j.add_child(root, "m", "Mechanics").unwrap();
        j.add_child(mech, "k", "Kinematics").unwrap();
        j.add_child(mech, "d", "Dynamics").unwrap();
        let waves = j.add_child(root, "w", "Waves").unwrap();
        j.add_child(waves, "s", "Sound").unwrap();

        let out = render_tree(&j, root, "d");
        assert_eq!(
            out,
            "- Physics\n\
             \x20 - Mechanics\n\
             \x20   - Kinematics\n\
             \x20   - Dynamics <-- (You are here)\n\
             \x20 - Waves\n\
             \x20   - Sound\n"
        );
        let marked: Vec<&str> = out.lines().filter(|l| l.ends_with(CURRENT_MARKER)).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("Dynamics"));
    }

    #[test]
    fn subtree_rendering_starts_at_zero_indent() {
        let mut j = Journey::new("r", "Root");
        let root = j.root();
        let a = j.add_child(root, "a", "A").unwrap();
        j.add_child(a, "a1", "A1").unwrap();
        assert_eq!(render_tree(&j, a, "a1"), "- A\n  - A1 <-- (You are here)\n");
    }

    #[test]
    fn very_deep_chain_renders() {
        let mut j = Journey::new("n0", "n0");
        let mut parent = j.root();
        for i in 1..2_000 {
            parent = j.add_child(parent, format!("n{i}"), format!("n{i}")).unwrap();
        }
        let out = render_tree(&j, j.root(), "n1999");
        assert_eq!(out.lines().count(), 2_000);
        assert!(out.ends_with("- n1999 <-- (You are here)\n"));
    }
}
