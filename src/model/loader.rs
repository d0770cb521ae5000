//! Reading forests from data files.

use std::fs;
use std::path::Path;

use super::node::TreeNode;
use crate::error::{Result, SprigError};

/// Load a forest from a JSON file.
///
/// The file holds either an array of nodes or a single node object, which is
/// treated as a one-root forest.
pub fn load_forest(path: &Path) -> Result<Vec<TreeNode>> {
    let content = fs::read_to_string(path).map_err(|source| SprigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let forest = parse_forest(&content).map_err(|source| SprigError::Data {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        roots = forest.len(),
        nodes = forest.iter().map(TreeNode::count).sum::<usize>(),
        "Loaded tree data"
    );

    Ok(forest)
}

/// Parse a forest from a JSON string.
pub fn parse_forest(content: &str) -> serde_json::Result<Vec<TreeNode>> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Forest {
        Many(Vec<TreeNode>),
        One(TreeNode),
    }

    Ok(match serde_json::from_str(content)? {
        Forest::Many(nodes) => nodes,
        Forest::One(node) => vec![node],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeId;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_array() {
        let forest = parse_forest(r#"[{"id": 1, "text": "A"}, {"id": 2, "text": "B"}]"#).unwrap();
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[1].id, NodeId::Int(2));
    }

    #[test]
    fn test_parse_single_root() {
        let forest = parse_forest(r#"{"id": "r", "text": "Root"}"#).unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].text, "Root");
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_forest("[]").unwrap().is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_forest(Path::new("/nonexistent/tree.json")).unwrap_err();
        assert!(matches!(err, SprigError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        let err = load_forest(file.path()).unwrap_err();
        assert!(matches!(err, SprigError::Data { .. }));
    }
}
