//! Rendered-side records: elements, groups and the marker classes that
//! themes key their styles on.

use super::animation::{Transition, TransitionKind};
use crate::model::NodeId;

/// Marker class names. Themes refer to these verbatim.
pub mod class {
    /// Root container of the whole tree.
    pub const ROOT: &str = "tree";
    /// Container holding a set of sibling rows.
    pub const GROUP: &str = "tree-group";
    /// A node row.
    pub const NODE: &str = "tree-node";
    /// The label part of a row.
    pub const LABEL: &str = "tree-label";
    /// Icon of a node without children.
    pub const LEAF_ICON: &str = "tree-leaf-icon";
    /// Expand/collapse affordance of a node with children.
    pub const SWITCHER: &str = "tree-switcher";
    /// State flag on a node whose subtree is hidden.
    pub const COLLAPSED: &str = "collapsed";
    /// State flag on the selected node.
    pub const SELECTED: &str = "selected";
    /// Context menu container.
    pub const CONTEXT_MENU: &str = "tree-context-menu";

    /// Every class a theme may style.
    pub const ALL: &[&str] = &[
        ROOT,
        GROUP,
        NODE,
        LABEL,
        LEAF_ICON,
        SWITCHER,
        COLLAPSED,
        SELECTED,
        CONTEXT_MENU,
    ];
}

/// Handle of a group in the widget's group table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub(crate) usize);

/// The group holding the root forest.
pub const ROOT_GROUP: GroupId = GroupId(0);

/// Which affordance a row shows in front of its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Leaf,
    Switcher,
}

impl Icon {
    pub fn class(self) -> &'static str {
        match self {
            Icon::Leaf => class::LEAF_ICON,
            Icon::Switcher => class::SWITCHER,
        }
    }
}

/// Logical data kept for each attached node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub id: NodeId,
    pub text: String,
    pub depth: usize,
    /// Child ids in display order.
    pub children: Vec<NodeId>,
}

/// Rendered record for one node row.
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) id: NodeId,
    pub(crate) label: String,
    pub(crate) icon: Icon,
    pub(crate) collapsed: bool,
    pub(crate) selected: bool,
    /// Group this row is a member of.
    pub(crate) group: GroupId,
    /// Group holding this node's children, once built.
    pub(crate) subtree: Option<GroupId>,
    pub(crate) transition: Option<Transition>,
}

impl Element {
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn icon(&self) -> Icon {
        self.icon
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Collapsed state once any running transition settles.
    pub fn settles_collapsed(&self) -> bool {
        self.transition
            .as_ref()
            .map_or(self.collapsed, |t| t.kind() == TransitionKind::Collapse)
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn subtree(&self) -> Option<GroupId> {
        self.subtree
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Marker classes currently carried by the row.
    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = vec![class::NODE];
        if self.collapsed {
            classes.push(class::COLLAPSED);
        }
        if self.selected {
            classes.push(class::SELECTED);
        }
        classes
    }
}

/// Rendered container for a set of siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Logical parent of the members; `None` for the root group.
    pub(crate) owner: Option<NodeId>,
    pub(crate) members: Vec<NodeId>,
}

impl Group {
    pub(crate) fn new(owner: Option<NodeId>) -> Self {
        Self {
            owner,
            members: Vec::new(),
        }
    }

    pub fn owner(&self) -> Option<&NodeId> {
        self.owner.as_ref()
    }

    pub fn members(&self) -> &[NodeId] {
        &self.members
    }
}
