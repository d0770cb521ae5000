//! Interactive tree widget.
//!
//! [`TreeWidget`] keeps two id-keyed tables in lock-step: the logical
//! [`NodeData`] of every attached node and the rendered [`Element`] for its
//! row. Rows live in [`Group`]s, one per set of siblings, and each group
//! records the logical parent that owns it. All structural operations go
//! through those tables; nothing holds references into another node.
//!
//! ```
//! use ratatui::widgets::Block;
//! use sprig::model::TreeNode;
//! use sprig::widget::{TreeOptions, TreeWidget};
//!
//! let data = vec![TreeNode::new(1, "A").with_children(vec![TreeNode::new(2, "B")])];
//! let mut tree = TreeWidget::new(Block::default(), TreeOptions::new().with_data(data).with_depth(1));
//!
//! tree.add_node(TreeNode::new(3, "C"), &1.into()).unwrap();
//! assert_eq!(tree.node_data(&1.into()).unwrap().children.len(), 2);
//! ```

mod animation;
mod element;
mod menu;
mod options;
mod render;
mod theme;

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::time::{Duration, Instant};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use ratatui::widgets::Block;

pub use animation::{Phase, Transition, TransitionKind};
pub use element::{class, Element, Group, GroupId, Icon, NodeData, ROOT_GROUP};
pub use menu::ContextMenu;
pub use options::{MenuEntry, NodeCallback, RenderedCallback, Target, TreeOptions};
pub use render::{calculate_scroll_offset, RowHit, RowPart};
pub use theme::{parse_style, Theme};

use crate::error::{TreeError, TreeResult};
use crate::model::{NodeId, TreeNode};

/// A row in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    pub id: NodeId,
    pub depth: usize,
}

pub struct TreeWidget {
    container: Block<'static>,
    nodes: HashMap<NodeId, NodeData>,
    elements: HashMap<NodeId, Element>,
    groups: HashMap<GroupId, Group>,
    next_group: usize,
    selected: Option<NodeId>,
    menu: Option<ContextMenu>,
    depth: usize,
    animation: Duration,
    theme: Theme,
    on_node_click: Option<NodeCallback>,
    offset: usize,
    hits: Vec<RowHit>,
}

impl TreeWidget {
    /// Build the widget and render the whole forest eagerly.
    ///
    /// `container` is the block the tree is mounted in. `on_rendered` runs
    /// once, after every node is attached.
    pub fn new(container: Block<'static>, options: TreeOptions) -> Self {
        let TreeOptions {
            data,
            context_menu,
            depth,
            animation,
            theme,
            on_rendered,
            on_node_click,
        } = options;

        let menu = (!context_menu.is_empty()).then(|| ContextMenu::new(context_menu));

        let mut groups = HashMap::new();
        groups.insert(ROOT_GROUP, Group::new(None));

        let mut widget = Self {
            container,
            nodes: HashMap::new(),
            elements: HashMap::new(),
            groups,
            next_group: ROOT_GROUP.0 + 1,
            selected: None,
            menu,
            depth,
            animation,
            theme,
            on_node_click,
            offset: 0,
            hits: Vec::new(),
        };

        for node in data {
            widget.build(node, 0, ROOT_GROUP);
        }

        tracing::debug!(
            roots = widget.roots().len(),
            nodes = widget.nodes.len(),
            depth,
            "Tree rendered"
        );

        if let Some(callback) = on_rendered {
            let data = widget.data();
            callback(&widget, &data);
        }

        widget
    }

    fn new_group(&mut self, owner: Option<NodeId>) -> GroupId {
        let id = GroupId(self.next_group);
        self.next_group += 1;
        self.groups.insert(id, Group::new(owner));
        id
    }

    /// Register `node` and its descendants and append it to `group`.
    fn build(&mut self, node: TreeNode, depth: usize, group: GroupId) {
        let TreeNode {
            id, text, children, ..
        } = node;

        let data = NodeData {
            id: id.clone(),
            text: text.clone(),
            depth,
            children: children.iter().map(|c| c.id.clone()).collect(),
        };
        if self.nodes.insert(id.clone(), data).is_some() {
            tracing::warn!(%id, "Duplicate node id, previous entry replaced");
        }

        let icon = if children.is_empty() {
            Icon::Leaf
        } else {
            Icon::Switcher
        };
        self.elements.insert(
            id.clone(),
            Element {
                id: id.clone(),
                label: text,
                icon,
                collapsed: depth >= self.depth,
                selected: false,
                group,
                subtree: None,
                transition: None,
            },
        );

        if !children.is_empty() {
            let subtree = self.new_group(Some(id.clone()));
            for child in children {
                self.build(child, depth + 1, subtree);
            }
            if let Some(element) = self.elements.get_mut(&id) {
                element.subtree = Some(subtree);
            }
        }

        if let Some(group) = self.groups.get_mut(&group) {
            group.members.push(id);
        }
    }

    // ---- accessors -------------------------------------------------------

    /// Ids of the root forest, in order.
    pub fn roots(&self) -> &[NodeId] {
        self.groups
            .get(&ROOT_GROUP)
            .map(|g| g.members.as_slice())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_data(&self, id: &NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    pub fn element(&self, id: &NodeId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    /// Keys of the logical data index.
    pub fn node_ids(&self) -> BTreeSet<NodeId> {
        self.nodes.keys().cloned().collect()
    }

    /// Keys of the rendered element index.
    pub fn element_ids(&self) -> BTreeSet<NodeId> {
        self.elements.keys().cloned().collect()
    }

    /// Reassemble the subtree rooted at `id`.
    pub fn node(&self, id: &NodeId) -> Option<TreeNode> {
        let data = self.nodes.get(id)?;
        Some(TreeNode {
            id: data.id.clone(),
            text: data.text.clone(),
            children: data.children.iter().filter_map(|c| self.node(c)).collect(),
            depth: data.depth,
        })
    }

    /// The whole forest as it currently stands.
    pub fn data(&self) -> Vec<TreeNode> {
        self.roots().iter().filter_map(|id| self.node(id)).collect()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.menu.as_ref()
    }

    fn not_found(id: &NodeId) -> TreeError {
        TreeError::NotFound(id.clone())
    }

    // ---- expand / collapse ----------------------------------------------

    /// Flip a node between expanded and collapsed.
    ///
    /// Starts a transition on the element; the collapsed flag flips when it
    /// settles. With a zero animation length that happens before returning.
    /// A toggle during a running transition replaces it and heads back
    /// from the state that transition was heading to.
    /// Returns `false` for nodes that have no subtree to show.
    pub fn toggle(&mut self, id: &NodeId) -> TreeResult<bool> {
        let animation = self.animation;
        let element = self.elements.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        if element.subtree.is_none() {
            return Ok(false);
        }

        let kind = if element.settles_collapsed() {
            TransitionKind::Expand
        } else {
            TransitionKind::Collapse
        };
        let mut transition = Transition::new(kind, animation);

        if animation.is_zero() {
            let now = Instant::now();
            while transition.advance(now) != Phase::Settled {}
            element.collapsed = kind == TransitionKind::Collapse;
            element.transition = None;
        } else {
            element.transition = Some(transition);
        }

        tracing::trace!(%id, ?kind, "Toggled node");
        Ok(true)
    }

    /// Advance running transitions. Returns whether any are still running.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut running = false;
        for element in self.elements.values_mut() {
            let Some(transition) = element.transition.as_mut() else {
                continue;
            };
            if transition.advance(now) == Phase::Settled {
                element.collapsed = transition.kind() == TransitionKind::Collapse;
                element.transition = None;
            } else {
                running = true;
            }
        }
        running
    }

    pub fn is_animating(&self) -> bool {
        self.elements.values().any(|e| e.transition.is_some())
    }

    fn resolve(&self, target: Target) -> Vec<NodeId> {
        match target {
            Target::One(id) => vec![id],
            Target::Many(ids) => ids,
            Target::All => self.roots().to_vec(),
        }
    }

    /// Expand the target nodes, then their descendants down to the
    /// configured depth.
    pub fn expand(&mut self, target: impl Into<Target>) -> TreeResult<()> {
        for id in self.resolve(target.into()) {
            self.expand_node(&id)?;
        }
        Ok(())
    }

    fn expand_node(&mut self, id: &NodeId) -> TreeResult<()> {
        let collapsed = self
            .elements
            .get(id)
            .ok_or_else(|| Self::not_found(id))?
            .settles_collapsed();
        if collapsed {
            self.toggle(id)?;
        }

        let children = self
            .nodes
            .get(id)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        for child in children {
            // Bounded by the static depth option, not by the call.
            let descend = self.nodes.get(&child).is_some_and(|c| c.depth < self.depth);
            if descend {
                self.expand_node(&child)?;
            }
        }
        Ok(())
    }

    /// Collapse the target nodes and every descendant.
    pub fn collapse(&mut self, target: impl Into<Target>) -> TreeResult<()> {
        for id in self.resolve(target.into()) {
            self.collapse_node(&id)?;
        }
        Ok(())
    }

    fn collapse_node(&mut self, id: &NodeId) -> TreeResult<()> {
        let collapsed = self
            .elements
            .get(id)
            .ok_or_else(|| Self::not_found(id))?
            .settles_collapsed();
        if !collapsed {
            self.toggle(id)?;
        }

        let children = self
            .nodes
            .get(id)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        for child in children {
            self.collapse_node(&child)?;
        }
        Ok(())
    }

    // ---- structural mutation --------------------------------------------

    /// Append `node` (and anything under it) to the children of `parent_id`.
    pub fn add_node(&mut self, node: TreeNode, parent_id: &NodeId) -> TreeResult<()> {
        let parent = self
            .nodes
            .get_mut(parent_id)
            .ok_or_else(|| Self::not_found(parent_id))?;
        let had_children = !parent.children.is_empty();
        let depth = parent.depth + 1;
        parent.children.push(node.id.clone());

        tracing::debug!(id = %node.id, parent = %parent_id, depth, "Adding node");

        let existing = self.elements.get(parent_id).and_then(|e| e.subtree);
        match existing {
            Some(group) if had_children => {
                self.build(node, depth, group);
                self.expand(parent_id)?;
            }
            _ => {
                // An earlier remove may have left an empty group behind.
                if let Some(stale) = existing {
                    self.groups.remove(&stale);
                }
                let group = self.new_group(Some(parent_id.clone()));
                self.build(node, depth, group);
                if let Some(parent) = self.elements.get_mut(parent_id) {
                    parent.subtree = Some(group);
                    parent.icon = Icon::Switcher;
                }
            }
        }
        Ok(())
    }

    /// Replace the text of an existing node. Structure is left alone.
    pub fn update_node(&mut self, node: TreeNode) -> TreeResult<()> {
        let element = self
            .elements
            .get_mut(&node.id)
            .ok_or_else(|| Self::not_found(&node.id))?;
        element.label = node.text.clone();
        if let Some(data) = self.nodes.get_mut(&node.id) {
            data.text = node.text;
        }
        tracing::debug!(id = %node.id, "Updated node");
        Ok(())
    }

    /// Detach a node and its subtree. Returns what was removed.
    pub fn remove_node(&mut self, id: &NodeId) -> TreeResult<TreeNode> {
        let group_id = self
            .elements
            .get(id)
            .ok_or_else(|| Self::not_found(id))?
            .group;
        let removed = self.node(id).ok_or_else(|| Self::not_found(id))?;

        let owner = match self.groups.get_mut(&group_id) {
            Some(group) => {
                group.members.retain(|m| m != id);
                group.owner.clone()
            }
            None => None,
        };

        self.forget(id);

        if let Some(parent_id) = owner {
            if let Some(parent) = self.nodes.get_mut(&parent_id) {
                parent.children.retain(|c| c != id);
                if parent.children.is_empty() {
                    if let Some(element) = self.elements.get_mut(&parent_id) {
                        element.icon = Icon::Leaf;
                    }
                }
            }
        }

        tracing::debug!(%id, nodes = removed.count(), "Removed node");
        Ok(removed)
    }

    fn forget(&mut self, id: &NodeId) {
        let children = self
            .nodes
            .remove(id)
            .map(|n| n.children)
            .unwrap_or_default();
        if let Some(subtree) = self.elements.remove(id).and_then(|e| e.subtree) {
            self.groups.remove(&subtree);
        }
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        for child in children {
            self.forget(&child);
        }
    }

    // ---- selection -------------------------------------------------------

    pub fn select_node(&mut self, id: &NodeId) -> TreeResult<()> {
        if !self.elements.contains_key(id) {
            return Err(Self::not_found(id));
        }
        self.mark_selected(id);
        Ok(())
    }

    /// Move the `selected` marker to `id`, which must have an element.
    fn mark_selected(&mut self, id: &NodeId) {
        if let Some(previous) = self.selected.take() {
            if let Some(element) = self.elements.get_mut(&previous) {
                element.selected = false;
            }
        }
        if let Some(element) = self.elements.get_mut(id) {
            element.selected = true;
        }
        self.selected = Some(id.clone());
    }

    /// Select a node the way a click on its row does, notifying
    /// `on_node_click`.
    pub fn click_node(&mut self, id: &NodeId) -> TreeResult<()> {
        self.select_node(id)?;
        let node = self.node(id).ok_or_else(|| Self::not_found(id))?;
        if let Some(callback) = self.on_node_click.as_mut() {
            callback(&node);
        }
        Ok(())
    }

    pub fn selected_id(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn selected_node(&self) -> Option<TreeNode> {
        self.selected.as_ref().and_then(|id| self.node(id))
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.as_ref().and_then(|id| self.elements.get(id))
    }

    /// Rows currently on display, in order, honoring collapsed subtrees and
    /// running transitions.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = Vec::new();
        self.collect_rows(ROOT_GROUP, &mut rows);
        rows
    }

    fn collect_rows(&self, group: GroupId, out: &mut Vec<VisibleRow>) {
        let Some(group) = self.groups.get(&group) else {
            return;
        };
        for id in &group.members {
            let (Some(element), Some(data)) = (self.elements.get(id), self.nodes.get(id)) else {
                continue;
            };
            out.push(VisibleRow {
                id: id.clone(),
                depth: data.depth,
            });

            let Some(subtree) = element.subtree else {
                continue;
            };
            if element.collapsed && element.transition.is_none() {
                continue;
            }
            let mut nested = Vec::new();
            self.collect_rows(subtree, &mut nested);
            let shown = element
                .transition
                .as_ref()
                .map_or(nested.len(), |t| t.visible_rows(nested.len()));
            nested.truncate(shown);
            out.extend(nested);
        }
    }

    /// Move the selection up or down the visible rows.
    pub fn move_selection(&mut self, delta: isize) {
        let rows = self.visible_rows();
        if rows.is_empty() {
            return;
        }
        let current = self
            .selected
            .as_ref()
            .and_then(|id| rows.iter().position(|r| &r.id == id));
        let next = match current {
            Some(index) => index
                .saturating_add_signed(delta)
                .min(rows.len() - 1),
            None if delta < 0 => rows.len() - 1,
            None => 0,
        };
        // Every visible row has an element.
        self.mark_selected(&rows[next].id);
    }

    pub fn select_first(&mut self) {
        if let Some(row) = self.visible_rows().first() {
            self.mark_selected(&row.id);
        }
    }

    pub fn select_last(&mut self) {
        if let Some(row) = self.visible_rows().last() {
            self.mark_selected(&row.id);
        }
    }

    // ---- context menu ----------------------------------------------------

    /// Show the context menu at `at`. Returns `false` if no menu was
    /// configured.
    pub fn open_context_menu(&mut self, at: Position) -> bool {
        match self.menu.as_mut() {
            Some(menu) => {
                menu.open(at);
                true
            }
            None => false,
        }
    }

    /// Open the menu next to the selected row, as last rendered.
    pub fn open_context_menu_at_selection(&mut self) -> bool {
        let Some(id) = self.selected.clone() else {
            return false;
        };
        match self.hits.iter().find(|hit| hit.id == id) {
            Some(hit) => {
                let at = Position::new(hit.label.x, hit.label.y.saturating_add(1));
                self.open_context_menu(at)
            }
            None => false,
        }
    }

    pub fn hide_context_menu(&mut self) {
        if let Some(menu) = self.menu.as_mut() {
            menu.hide();
        }
    }

    pub fn is_menu_visible(&self) -> bool {
        self.menu.as_ref().is_some_and(ContextMenu::is_visible)
    }

    pub fn menu_next(&mut self) {
        if let Some(menu) = self.menu.as_mut() {
            menu.next();
        }
    }

    pub fn menu_previous(&mut self) {
        if let Some(menu) = self.menu.as_mut() {
            menu.previous();
        }
    }

    /// Run menu entry `index` on the selected node and hide the menu.
    ///
    /// Returns whether an entry ran; nothing runs without a selection.
    pub fn activate_menu_item(&mut self, index: usize) -> bool {
        let node = self.selected_node();
        let Some(menu) = self.menu.as_mut() else {
            return false;
        };
        menu.hide();

        match (node, menu.entries.get_mut(index)) {
            (Some(node), Some(entry)) => {
                tracing::debug!(entry = %entry.text, id = %node.id, "Context menu entry activated");
                (entry.on_click)(&node);
                true
            }
            _ => false,
        }
    }

    pub fn activate_highlighted(&mut self) -> bool {
        let index = self.menu.as_ref().map(ContextMenu::highlighted);
        index.is_some_and(|i| self.activate_menu_item(i))
    }

    // ---- pointer input ---------------------------------------------------

    /// Root-level mouse dispatch. Returns whether the event was consumed.
    ///
    /// A left click on a switcher toggles the node, anywhere else on a row
    /// it clicks the node. A right click on a label selects the node and
    /// opens the context menu at the pointer. Any left click closes an open
    /// menu, running the entry under the pointer if there is one.
    pub fn handle_mouse(&mut self, event: MouseEvent) -> bool {
        let position = Position::new(event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.is_menu_visible() {
                    let entry = self.menu.as_ref().and_then(|m| m.entry_at(position));
                    if let Some(index) = entry {
                        self.activate_menu_item(index);
                        return true;
                    }
                    self.hide_context_menu();
                }
                match self.hit_test(position) {
                    Some((id, RowPart::Switcher)) => self.toggle(&id).is_ok(),
                    Some((id, _)) => self.click_node(&id).is_ok(),
                    None => false,
                }
            }
            MouseEventKind::Down(MouseButton::Right) => match self.hit_test(position) {
                Some((id, RowPart::Label)) if self.menu.is_some() => {
                    if self.select_node(&id).is_err() {
                        return false;
                    }
                    self.open_context_menu(position)
                }
                _ => {
                    self.hide_context_menu();
                    false
                }
            },
            _ => false,
        }
    }

    /// Which row, and which part of it, was drawn at `position`.
    pub fn hit_test(&self, position: Position) -> Option<(NodeId, RowPart)> {
        self.hits.iter().find_map(|hit| hit.part_at(position).map(|part| (hit.id.clone(), part)))
    }
}

impl fmt::Debug for TreeWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeWidget")
            .field("nodes", &self.nodes.len())
            .field("groups", &self.groups.len())
            .field("selected", &self.selected)
            .field("depth", &self.depth)
            .field("animation", &self.animation)
            .finish_non_exhaustive()
    }
}
