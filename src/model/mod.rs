mod formatter;
mod loader;
mod node;

pub use formatter::{format_json, format_tree, FormatOptions};
pub use loader::{load_forest, parse_forest};
pub use node::{NodeId, TreeNode};
