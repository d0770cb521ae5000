use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a tree node.
///
/// Data files may use either integers or strings as ids; both are kept as
/// given so that a tree round-trips through JSON unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Text(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Int(n) => write!(f, "{}", n),
            NodeId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NodeId {
    fn from(n: i64) -> Self {
        NodeId::Int(n)
    }
}

impl From<i32> for NodeId {
    fn from(n: i32) -> Self {
        NodeId::Int(i64::from(n))
    }
}

impl From<u32> for NodeId {
    fn from(n: u32) -> Self {
        NodeId::Int(i64::from(n))
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::Text(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId::Text(s)
    }
}

/// A node of the input forest.
///
/// `depth` is owned by the widget: it is overwritten whenever the node is
/// built or attached, whatever the input says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Unique identifier across the whole tree
    pub id: NodeId,

    /// Label shown on the row
    #[serde(default)]
    pub text: String,

    /// Child nodes, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,

    /// Distance from the root forest (0 for roots)
    #[serde(default)]
    pub depth: usize,
}

impl TreeNode {
    /// Create a childless node.
    pub fn new(id: impl Into<NodeId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            children: Vec::new(),
            depth: 0,
        }
    }

    /// Builder-style helper to attach children.
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_accepts_numbers_and_strings() {
        let ids: Vec<NodeId> = serde_json::from_str(r#"[1, "b", -3]"#).unwrap();
        assert_eq!(
            ids,
            vec![NodeId::Int(1), NodeId::Text("b".into()), NodeId::Int(-3)]
        );
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId::Int(42).to_string(), "42");
        assert_eq!(NodeId::from("root").to_string(), "root");
    }

    #[test]
    fn test_tree_node_defaults() {
        let node: TreeNode = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(node.id, NodeId::Int(1));
        assert_eq!(node.text, "");
        assert!(node.children.is_empty());
        assert_eq!(node.depth, 0);
    }

    #[test]
    fn test_tree_node_nested() {
        let json = r#"{"id": 1, "text": "A", "children": [{"id": 2, "text": "B"}]}"#;
        let node: TreeNode = serde_json::from_str(json).unwrap();
        assert!(!node.is_leaf());
        assert_eq!(node.children[0].text, "B");
        assert_eq!(node.count(), 2);
    }

    #[test]
    fn test_leaf_children_are_not_serialized() {
        let node = TreeNode::new("leaf", "Leaf");
        let json = serde_json::to_string(&node).unwrap();
        assert!(!json.contains("children"));
    }
}
