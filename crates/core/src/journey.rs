//! The learning-journey tree.
//!
//! A [`Journey`] owns every [`LearningNode`] in an arena and hands out
//! [`NodeKey`]s. Parents are back-references by key, children are an ordered
//! list of keys. Nodes can only be created underneath a node that already
//! exists, so the parent/child relation is always a rooted tree.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::JourneyError;
use crate::visual::VisualAsset;

/// Handle to a node inside one [`Journey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(usize);

/// A technical term introduced by generated content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub term: String,
    pub definition: String,
}

impl Definition {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }
}

/// Content attached to a node once the LLM has generated it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeContent {
    /// Explanation text. May contain HTML markup from the renderer.
    pub overview: String,

    #[serde(default)]
    pub definitions: Vec<Definition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_assets: Option<Vec<VisualAsset>>,
}

/// One node of the journey.
#[derive(Debug, Clone)]
pub struct LearningNode {
    id: String,
    full_title: String,
    content: Option<NodeContent>,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

impl LearningNode {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn full_title(&self) -> &str {
        &self.full_title
    }

    pub fn content(&self) -> Option<&NodeContent> {
        self.content.as_ref()
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// Attach (or replace) generated content.
    pub fn set_content(&mut self, content: NodeContent) {
        self.content = Some(content);
    }
}

/// Nested, serializable form of a journey, as the front end stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOutline {
    pub id: String,
    pub full_title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<NodeContent>,

    #[serde(default)]
    pub children: Vec<NodeOutline>,
}

impl Drop for NodeOutline {
    // Flatten before dropping so a deep outline does not recurse.
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// The arena holding a user's whole journey. Index 0 is always the root.
#[derive(Debug, Clone)]
pub struct Journey {
    nodes: Vec<LearningNode>,
    by_id: HashMap<String, NodeKey>,
}

impl Journey {
    /// Create a journey containing only its root node.
    pub fn new(root_id: impl Into<String>, root_title: impl Into<String>) -> Self {
        let id = root_id.into();
        let mut by_id = HashMap::new();
        by_id.insert(id.clone(), NodeKey(0));
        Self {
            nodes: vec![LearningNode {
                id,
                full_title: root_title.into(),
                content: None,
                parent: None,
                children: Vec::new(),
            }],
            by_id,
        }
    }

    /// Build an arena from a nested outline.
    ///
    /// Children keep their outline order. Walks iteratively so very deep
    /// outlines do not exhaust the stack.
    pub fn from_outline(outline: &NodeOutline) -> Result<Self, JourneyError> {
        let mut journey = Self::new(outline.id.clone(), outline.full_title.clone());
        if let Some(content) = &outline.content {
            journey.nodes[0].content = Some(content.clone());
        }

        let mut stack: Vec<(NodeKey, &NodeOutline)> = outline
            .children
            .iter()
            .rev()
            .map(|child| (NodeKey(0), child))
            .collect();

        while let Some((parent, node)) = stack.pop() {
            let key = journey.add_child(parent, node.id.clone(), node.full_title.clone())?;
            if let Some(content) = &node.content {
                journey.nodes[key.0].content = Some(content.clone());
            }
            stack.extend(node.children.iter().rev().map(|child| (key, child)));
        }

        Ok(journey)
    }

    /// Convert back into the nested form.
    ///
    /// Builds bottom-up from the pre-order listing, so depth is not limited
    /// by the stack.
    pub fn to_outline(&self) -> NodeOutline {
        let mut pending: Vec<Vec<NodeOutline>> =
            (0..self.nodes.len()).map(|_| Vec::new()).collect();

        // Reverse pre-order visits every child before its parent, and
        // siblings last-to-first.
        for (key, _) in self.depth_first(self.root()).into_iter().skip(1).rev() {
            let node = &self.nodes[key.0];
            let outline = outline_node(node, std::mem::take(&mut pending[key.0]));
            if let Some(parent) = node.parent {
                pending[parent.0].push(outline);
            }
        }

        outline_node(&self.nodes[0], std::mem::take(&mut pending[0]))
    }

    pub fn root(&self) -> NodeKey {
        NodeKey(0)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A journey always has a root, so this is never true.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a new child under `parent`.
    pub fn add_child(
        &mut self,
        parent: NodeKey,
        id: impl Into<String>,
        full_title: impl Into<String>,
    ) -> Result<NodeKey, JourneyError> {
        let id = id.into();
        if self.by_id.contains_key(&id) {
            return Err(JourneyError::DuplicateId(id));
        }
        if parent.0 >= self.nodes.len() {
            return Err(JourneyError::UnknownId(format!("#{}", parent.0)));
        }

        let key = NodeKey(self.nodes.len());
        self.nodes.push(LearningNode {
            id: id.clone(),
            full_title: full_title.into(),
            content: None,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(key);
        self.by_id.insert(id, key);
        Ok(key)
    }

    pub fn get(&self, key: NodeKey) -> Option<&LearningNode> {
        self.nodes.get(key.0)
    }

    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut LearningNode> {
        self.nodes.get_mut(key.0)
    }

    /// Look a node up by its identifier.
    pub fn find(&self, id: &str) -> Option<NodeKey> {
        self.by_id.get(id).copied()
    }

    /// Like [`find`](Self::find) but reports the missing id.
    pub fn require(&self, id: &str) -> Result<NodeKey, JourneyError> {
        self.find(id)
            .ok_or_else(|| JourneyError::UnknownId(id.to_string()))
    }

    /// Iterate from `start` up to the root, `start` first.
    ///
    /// The walk never yields more than [`len`](Self::len) nodes.
    pub fn ancestors(&self, start: NodeKey) -> Ancestors<'_> {
        Ancestors {
            journey: self,
            next: self.get(start).map(|_| start),
            remaining: self.nodes.len(),
        }
    }

    /// Pre-order depth-first listing of the subtree under `from`, with the
    /// depth of each node relative to `from`.
    pub fn depth_first(&self, from: NodeKey) -> Vec<(NodeKey, usize)> {
        let mut out = Vec::new();
        if self.get(from).is_none() {
            return out;
        }

        let mut stack = vec![(from, 0usize)];
        while let Some((key, depth)) = stack.pop() {
            out.push((key, depth));
            if out.len() > self.nodes.len() {
                break;
            }
            let children = &self.nodes[key.0].children;
            stack.extend(children.iter().rev().map(|c| (*c, depth + 1)));
        }
        out
    }
}

fn outline_node(node: &LearningNode, mut children: Vec<NodeOutline>) -> NodeOutline {
    children.reverse();
    NodeOutline {
        id: node.id.clone(),
        full_title: node.full_title.clone(),
        content: node.content.clone(),
        children,
    }
}

/// Iterator returned by [`Journey::ancestors`].
pub struct Ancestors<'a> {
    journey: &'a Journey,
    next: Option<NodeKey>,
    remaining: usize,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (NodeKey, &'a LearningNode);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let key = self.next?;
        let node = self.journey.get(key)?;
        self.remaining -= 1;
        self.next = node.parent;
        Some((key, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Journey {
        let mut j = Journey::new("root", "Algebra");
        let lin = j.add_child(j.root(), "lin", "Linear Equations").unwrap();
        j.add_child(lin, "slope", "Slope").unwrap();
        j.add_child(j.root(), "quad", "Quadratics").unwrap();
        j
    }

    #[test]
    fn add_and_find() {
        let j = sample();
        assert_eq!(j.len(), 4);
        let slope = j.find("slope").unwrap();
        assert_eq!(j.get(slope).unwrap().full_title(), "Slope");
        assert!(j.find("nope").is_none());
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut j = sample();
        let root = j.root();
        let err = j.add_child(root, "lin", "Again").unwrap_err();
        assert_eq!(err, JourneyError::DuplicateId("lin".into()));
    }

    #[test]
    fn ancestors_walk_to_root() {
        let j = sample();
        let slope = j.find("slope").unwrap();
        let titles: Vec<&str> = j.ancestors(slope).map(|(_, n)| n.full_title()).collect();
        assert_eq!(titles, vec!["Slope", "Linear Equations", "Algebra"]);
    }

    #[test]
    fn depth_first_preorder() {
        let j = sample();
        let listing: Vec<(&str, usize)> = j
            .depth_first(j.root())
            .into_iter()
            .map(|(k, d)| (j.get(k).unwrap().id(), d))
            .collect();
        assert_eq!(
            listing,
            vec![("root", 0), ("lin", 1), ("slope", 2), ("quad", 1)]
        );
    }

    #[test]
    fn outline_roundtrip_preserves_order() {
        let json = r#"{
            "id": "r", "fullTitle": "History",
            "children": [
                { "id": "a", "fullTitle": "Ancient",
                  "content": { "overview": "<p>Old</p>", "definitions": [{ "term": "BC", "definition": "before" }] },
                  "children": [ { "id": "a1", "fullTitle": "Egypt" } ] },
                { "id": "b", "fullTitle": "Modern" }
            ]
        }"#;
        let outline: NodeOutline = serde_json::from_str(json).unwrap();
        let j = Journey::from_outline(&outline).unwrap();
        assert_eq!(j.len(), 4);
        let a = j.get(j.find("a").unwrap()).unwrap();
        assert_eq!(a.content().unwrap().definitions[0].term, "BC");
        assert_eq!(j.to_outline(), outline);
    }

    #[test]
    fn outline_with_duplicate_ids_rejected() {
        let outline = NodeOutline {
            id: "r".into(),
            full_title: "Root".into(),
            content: None,
            children: vec![NodeOutline {
                id: "r".into(),
                full_title: "Copy".into(),
                content: None,
                children: vec![],
            }],
        };
        assert!(matches!(
            Journey::from_outline(&outline),
            Err(JourneyError::DuplicateId(_))
        ));
    }

    #[test]
    fn deep_outline_does_not_overflow() {
        let mut outline = NodeOutline {
            id: "n0".into(),
            full_title: "n0".into(),
            content: None,
            children: vec![],
        };
        for i in 1..5_000 {
            outline = NodeOutline {
                id: format!("n{i}"),
                full_title: format!("n{i}"),
                content: None,
                children: vec![outline],
            };
        }
        let j = Journey::from_outline(&outline).unwrap();
        assert_eq!(j.len(), 5_000);
        assert_eq!(j.ancestors(j.find("n0").unwrap()).count(), 5_000);

        let back = j.to_outline();
        let mut depth = 0;
        let mut node = &back;
        while let Some(child) = node.children.first() {
            assert_eq!(node.children.len(), 1);
            depth += 1;
            node = child;
        }
        assert_eq!(depth, 4_999);
        assert_eq!(back.id, "n4999");
        assert_eq!(node.id, "n0");
    }
}
