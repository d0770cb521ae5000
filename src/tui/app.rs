//! Application state for the TUI.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use ratatui::widgets::{Block, Borders};

use crate::error::{TreeError, TreeResult};
use crate::model::{NodeId, TreeNode};
use crate::widget::{MenuEntry, Target, Theme, TreeOptions, TreeWidget};

/// The current UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal navigation mode.
    Normal,
    /// Editing the label of a node.
    Rename,
    /// Help overlay mode.
    Help,
}

/// Work posted by widget callbacks, applied after the event that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeAction {
    Clicked(NodeId),
    AddChild(NodeId),
    Rename(NodeId),
    Remove(NodeId),
    Expand(NodeId),
    Collapse(NodeId),
}

/// Context menu entries offered by the viewer.
const MENU: [(&str, fn(NodeId) -> TreeAction); 5] = [
    ("Add child", TreeAction::AddChild),
    ("Rename", TreeAction::Rename),
    ("Remove", TreeAction::Remove),
    ("Expand", TreeAction::Expand),
    ("Collapse", TreeAction::Collapse),
];

/// Widget settings resolved from config and CLI.
#[derive(Debug, Clone)]
pub struct ViewSettings {
    pub depth: usize,
    pub animation: Duration,
    pub theme: Theme,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            depth: 1,
            animation: Duration::ZERO,
            theme: Theme::default(),
        }
    }
}

/// Main application state for the TUI.
pub struct App {
    /// File the forest was loaded from.
    pub source: PathBuf,

    pub tree: TreeWidget,

    /// Current UI mode.
    pub mode: Mode,

    /// Rename input buffer.
    pub input: String,

    /// Node being renamed.
    pub renaming: Option<NodeId>,

    /// Application should quit.
    pub should_quit: bool,

    /// Status message to display.
    pub status_message: Option<String>,

    actions: Receiver<TreeAction>,
    next_id: i64,
}

impl App {
    /// Create a new App instance over `data`.
    pub fn new(source: PathBuf, data: Vec<TreeNode>, settings: ViewSettings) -> Self {
        let (sender, actions) = mpsc::channel();
        let next_id = data.iter().map(max_int_id).max().flatten().map_or(1, |n| n + 1);

        let mut options = TreeOptions::new()
            .with_data(data)
            .with_depth(settings.depth)
            .with_animation(settings.animation)
            .with_theme(settings.theme);

        for (text, action) in MENU {
            let sender = sender.clone();
            options = options.with_menu_entry(MenuEntry::new(text, move |node: &TreeNode| {
                let _ = sender.send(action(node.id.clone()));
            }));
        }

        let click_sender = sender;
        options = options
            .on_node_click(move |node| {
                let _ = click_sender.send(TreeAction::Clicked(node.id.clone()));
            })
            .on_rendered(|tree, data| {
                tracing::debug!(roots = data.len(), nodes = tree.len(), "Viewer ready");
            });

        let title = source
            .file_name()
            .map(|name| format!(" {} ", name.to_string_lossy()))
            .unwrap_or_default();
        let container = Block::default().title(title).borders(Borders::ALL);

        let mut tree = TreeWidget::new(container, options);
        tree.select_first();

        Self {
            source,
            tree,
            mode: Mode::Normal,
            input: String::new(),
            renaming: None,
            should_quit: false,
            status_message: None,
            actions,
            next_id,
        }
    }

    /// Apply everything widget callbacks posted since the last call.
    pub fn process_actions(&mut self) {
        while let Ok(action) = self.actions.try_recv() {
            self.apply(action);
        }
    }

    pub fn apply(&mut self, action: TreeAction) {
        tracing::debug!(?action, "Applying tree action");
        let result = match action {
            TreeAction::Clicked(id) => {
                if let Some(node) = self.tree.node_data(&id) {
                    self.status_message = Some(format!("Selected '{}'", node.text));
                }
                Ok(())
            }
            TreeAction::AddChild(id) => self.add_child(&id),
            TreeAction::Rename(id) => self.start_rename(&id),
            TreeAction::Remove(id) => self.remove(&id),
            TreeAction::Expand(id) => self.tree.expand(id),
            TreeAction::Collapse(id) => self.tree.collapse(id),
        };

        if let Err(err) = result {
            tracing::warn!("Tree action failed: {}", err);
            self.status_message = Some(err.to_string());
        }
    }

    /// Get the id of the selected node, if any.
    pub fn selected_id(&self) -> Option<NodeId> {
        self.tree.selected_id().cloned()
    }

    pub fn move_selection(&mut self, delta: isize) {
        self.status_message = None;
        self.tree.move_selection(delta);
    }

    pub fn expand_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.apply(TreeAction::Expand(id));
        }
    }

    pub fn collapse_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            self.apply(TreeAction::Collapse(id));
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            if let Err(err) = self.tree.toggle(&id) {
                self.status_message = Some(err.to_string());
            }
        }
    }

    /// Act as if the selected row was clicked.
    pub fn click_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            if let Err(err) = self.tree.click_node(&id) {
                self.status_message = Some(err.to_string());
            }
        }
        self.process_actions();
    }

    pub fn expand_all(&mut self) {
        if let Err(err) = self.tree.expand(Target::All) {
            self.status_message = Some(err.to_string());
        }
    }

    pub fn collapse_all(&mut self) {
        if let Err(err) = self.tree.collapse(Target::All) {
            self.status_message = Some(err.to_string());
        }
    }

    /// Add a placeholder child under `parent` and select it.
    pub fn add_child(&mut self, parent: &NodeId) -> TreeResult<()> {
        let id = NodeId::Int(self.next_id);
        let node = TreeNode::new(id.clone(), format!("New node {}", id));
        self.tree.add_node(node, parent)?;
        self.next_id += 1;

        // A first child does not re-expand its parent on its own.
        self.tree.expand(parent)?;
        self.tree.select_node(&id)?;
        self.status_message = Some(format!("Added node {}", id));
        Ok(())
    }

    pub fn start_rename(&mut self, id: &NodeId) -> TreeResult<()> {
        let node = self
            .tree
            .node_data(id)
            .ok_or_else(|| TreeError::NotFound(id.clone()))?;
        self.input = node.text.clone();
        self.renaming = Some(id.clone());
        self.mode = Mode::Rename;
        Ok(())
    }

    pub fn commit_rename(&mut self) {
        self.mode = Mode::Normal;
        let Some(id) = self.renaming.take() else {
            return;
        };
        let text = std::mem::take(&mut self.input);
        let result = match self.tree.node(&id) {
            Some(mut node) => {
                node.text = text;
                self.tree.update_node(node)
            }
            None => Err(TreeError::NotFound(id)),
        };
        self.status_message = Some(match result {
            Ok(()) => "Renamed".to_string(),
            Err(err) => err.to_string(),
        });
    }

    pub fn cancel_rename(&mut self) {
        self.mode = Mode::Normal;
        self.renaming = None;
        self.input.clear();
    }

    /// Remove a node and move the selection to the row above it.
    pub fn remove(&mut self, id: &NodeId) -> TreeResult<()> {
        let rows = self.tree.visible_rows();
        let position = rows.iter().position(|r| &r.id == id);

        let removed = self.tree.remove_node(id)?;
        self.status_message = Some(format!(
            "Removed '{}' ({} nodes)",
            removed.text,
            removed.count()
        ));

        if self.tree.selected_id().is_none() {
            let above = position
                .and_then(|p| p.checked_sub(1))
                .and_then(|p| rows.get(p))
                .filter(|row| self.tree.element(&row.id).is_some())
                .map(|row| row.id.clone());
            match above {
                Some(above) => self.tree.select_node(&above)?,
                None => self.tree.select_first(),
            }
        }
        Ok(())
    }
}

fn max_int_id(node: &TreeNode) -> Option<i64> {
    let own = match node.id {
        NodeId::Int(n) => Some(n),
        NodeId::Text(_) => None,
    };
    node.children.iter().map(max_int_id).fold(own, |a, b| a.max(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<TreeNode> {
        vec![TreeNode::new(1, "A").with_children(vec![
            TreeNode::new(2, "B"),
            TreeNode::new(7, "C"),
        ])]
    }

    fn app() -> App {
        App::new(PathBuf::from("/data/tree.json"), sample(), ViewSettings::default())
    }

    #[test]
    fn test_app_new() {
        let app = app();
        assert_eq!(app.mode, Mode::Normal);
        assert!(!app.should_quit);
        assert_eq!(app.selected_id(), Some(NodeId::Int(1)));
        assert_eq!(app.next_id, 8);
        assert_eq!(app.tree.context_menu().unwrap().len(), MENU.len());
    }

    #[test]
    fn test_max_int_id_ignores_text_ids() {
        let node = TreeNode::new("root", "R").with_children(vec![TreeNode::new(4, "x")]);
        assert_eq!(max_int_id(&node), Some(4));
        assert_eq!(max_int_id(&TreeNode::new("a", "b")), None);
    }

    #[test]
    fn test_add_child_to_leaf_expands_parent() {
        let mut app = app();
        app.add_child(&NodeId::Int(2)).unwrap();
        assert_eq!(app.selected_id(), Some(NodeId::Int(8)));
        assert!(!app.tree.element(&NodeId::Int(2)).unwrap().is_collapsed());
        assert_eq!(app.next_id, 9);
    }

    #[test]
    fn test_add_child_unknown_parent() {
        let mut app = app();
        app.apply(TreeAction::AddChild(NodeId::Int(99)));
        assert_eq!(app.status_message.as_deref(), Some("Node not found: 99"));
        assert_eq!(app.next_id, 8);
    }

    #[test]
    fn test_rename_flow() {
        let mut app = app();
        app.start_rename(&NodeId::Int(2)).unwrap();
        assert_eq!(app.mode, Mode::Rename);
        assert_eq!(app.input, "B");

        app.input = "Bee".to_string();
        app.commit_rename();
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.tree.node_data(&NodeId::Int(2)).unwrap().text, "Bee");
    }

    #[test]
    fn test_remove_selects_row_above() {
        let mut app = app();
        app.tree.select_node(&NodeId::Int(7)).unwrap();
        app.remove(&NodeId::Int(7)).unwrap();
        assert_eq!(app.selected_id(), Some(NodeId::Int(2)));
    }

    #[test]
    fn test_menu_actions_are_queued() {
        let mut app = app();
        app.tree.select_node(&NodeId::Int(2)).unwrap();
        // "Remove" entry
        assert!(app.tree.activate_menu_item(2));
        assert!(app.tree.node_data(&NodeId::Int(2)).is_some());
        app.process_actions();
        assert!(app.tree.node_data(&NodeId::Int(2)).is_none());
    }
}
