use std::fmt;
use std::time::Duration;

use super::theme::Theme;
use super::TreeWidget;
use crate::model::{NodeId, TreeNode};

/// Called once after construction with the widget and its forest.
pub type RenderedCallback = Box<dyn FnOnce(&TreeWidget, &[TreeNode])>;

/// Called with the node a click selected, or the node a menu entry acts on.
pub type NodeCallback = Box<dyn FnMut(&TreeNode)>;

/// One context-menu entry.
pub struct MenuEntry {
    pub text: String,
    pub on_click: NodeCallback,
}

impl MenuEntry {
    pub fn new(text: impl Into<String>, on_click: impl FnMut(&TreeNode) + 'static) -> Self {
        Self {
            text: text.into(),
            on_click: Box::new(on_click),
        }
    }
}

impl fmt::Debug for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuEntry").field("text", &self.text).finish()
    }
}

/// Construction options for a [`TreeWidget`].
#[derive(Default)]
pub struct TreeOptions {
    /// Initial forest
    pub data: Vec<TreeNode>,
    /// Context menu entries; no menu is built when empty
    pub context_menu: Vec<MenuEntry>,
    /// Nodes shallower than this start expanded
    pub depth: usize,
    /// Expand/collapse transition length (zero settles immediately)
    pub animation: Duration,
    pub theme: Theme,
    pub on_rendered: Option<RenderedCallback>,
    pub on_node_click: Option<NodeCallback>,
}

impl TreeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(mut self, data: Vec<TreeNode>) -> Self {
        self.data = data;
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_animation(mut self, duration: Duration) -> Self {
        self.animation = duration;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_menu_entry(mut self, entry: MenuEntry) -> Self {
        self.context_menu.push(entry);
        self
    }

    pub fn on_rendered(mut self, callback: impl FnOnce(&TreeWidget, &[TreeNode]) + 'static) -> Self {
        self.on_rendered = Some(Box::new(callback));
        self
    }

    pub fn on_node_click(mut self, callback: impl FnMut(&TreeNode) + 'static) -> Self {
        self.on_node_click = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for TreeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeOptions")
            .field("roots", &self.data.len())
            .field("context_menu", &self.context_menu)
            .field("depth", &self.depth)
            .field("animation", &self.animation)
            .finish_non_exhaustive()
    }
}

/// Nodes an expand or collapse applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    One(NodeId),
    Many(Vec<NodeId>),
    /// The whole root forest
    All,
}

impl From<NodeId> for Target {
    fn from(id: NodeId) -> Self {
        Target::One(id)
    }
}

impl From<&NodeId> for Target {
    fn from(id: &NodeId) -> Self {
        Target::One(id.clone())
    }
}

impl From<Vec<NodeId>> for Target {
    fn from(ids: Vec<NodeId>) -> Self {
        Target::Many(ids)
    }
}

impl From<&[NodeId]> for Target {
    fn from(ids: &[NodeId]) -> Self {
        Target::Many(ids.to_vec())
    }
}

impl From<Option<NodeId>> for Target {
    fn from(id: Option<NodeId>) -> Self {
        id.map_or(Target::All, Target::One)
    }
}
