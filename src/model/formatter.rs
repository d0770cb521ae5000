use super::node::TreeNode;

/// Format options for tree output
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    /// Maximum depth to display
    pub max_depth: Option<usize>,
    /// Show only the first N children per node
    pub top_n: Option<usize>,
    /// Append node ids to labels
    pub show_ids: bool,
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }

    pub fn with_ids(mut self, show: bool) -> Self {
        self.show_ids = show;
        self
    }
}

/// Format a forest as a box-drawing tree, one root after another.
///
/// Relies on the `depth` recorded on each node, so the forest should come
/// out of a [`TreeWidget`](crate::widget::TreeWidget).
pub fn format_tree(forest: &[TreeNode], options: &FormatOptions) -> String {
    let mut output = String::new();
    for root in forest {
        format_tree_recursive(root, &mut output, "", true, options);
    }
    output
}

fn format_tree_recursive(
    node: &TreeNode,
    output: &mut String,
    prefix: &str,
    is_last: bool,
    options: &FormatOptions,
) {
    if let Some(max_depth) = options.max_depth {
        if node.depth > max_depth {
            return;
        }
    }

    let connector = if node.depth == 0 {
        ""
    } else if is_last {
        "└── "
    } else {
        "├── "
    };

    let id_suffix = if options.show_ids {
        format!(" [{}]", node.id)
    } else {
        String::new()
    };

    output.push_str(&format!("{}{}{}{}\n", prefix, connector, node.text, id_suffix));

    if node.children.is_empty() {
        return;
    }

    let new_prefix = if node.depth == 0 {
        String::new()
    } else if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    let shown: Vec<_> = match options.top_n {
        Some(n) => node.children.iter().take(n).collect(),
        None => node.children.iter().collect(),
    };
    let hidden = node.children.len() - shown.len();
    let total = shown.len();

    for (i, child) in shown.iter().enumerate() {
        let is_last_child = i == total - 1 && hidden == 0;
        format_tree_recursive(child, output, &new_prefix, is_last_child, options);
    }

    let children_visible = options.max_depth.map_or(true, |max| node.depth < max);
    if hidden > 0 && children_visible {
        output.push_str(&format!("{}└── ... and {} more\n", new_prefix, hidden));
    }
}

/// Format a forest as JSON
pub fn format_json(forest: &[TreeNode], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(forest)
    } else {
        serde_json::to_string(forest)
    }
}
