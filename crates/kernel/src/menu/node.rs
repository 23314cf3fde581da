//! A single entry in the admin navigation tree.

use std::sync::Arc;

use serde::Serialize;

/// Icon used when a view does not pick one.
pub const DEFAULT_ICON: &str = "fa-circle-o";

/// A named, iconized menu entry.
///
/// Nodes are declared statically alongside the admin view they belong to.
/// The canonical view name is filled in by forest assembly, and child
/// nodes are only ever appended there (see [`assemble_forest`]).
///
/// [`assemble_forest`]: super::assemble_forest
#[derive(Debug, Clone, Serialize)]
pub struct MenuNode {
    /// Label shown in the sidebar.
    pub name: String,
    /// Font Awesome classes for the icon.
    pub icon_classes: String,
    /// Optional tooltip / page subtitle.
    pub description: Option<String>,
    /// Canonical name of the view this node links to.
    pub view_name: Option<String>,
    /// Sort weight; higher weights are listed first.
    pub sort: i32,
    /// Child nodes in registration order.
    pub sub_menus: Vec<MenuNode>,
    /// Declared parent group, if any.
    #[serde(skip)]
    pub parent_menu: Option<Arc<MenuNode>>,
}

impl MenuNode {
    /// Create a node with the default icon and no parent.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon_classes: DEFAULT_ICON.to_string(),
            description: None,
            view_name: None,
            sort: 0,
            sub_menus: Vec::new(),
            parent_menu: None,
        }
    }

    /// Set the icon classes.
    pub fn icon(mut self, icon_classes: impl Into<String>) -> Self {
        self.icon_classes = icon_classes.into();
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Nest this node under a parent group.
    pub fn parent(mut self, parent: Arc<MenuNode>) -> Self {
        self.parent_menu = Some(parent);
        self
    }

    /// Set the sort weight.
    pub fn sort(mut self, sort: i32) -> Self {
        self.sort = sort;
        self
    }

    /// Whether this node links to `view_name`.
    ///
    /// A node that has not been bound to a view is never active.
    pub fn active(&self, view_name: &str) -> bool {
        self.view_name.as_deref() == Some(view_name)
    }

    /// Same entry, ignoring children and parent.
    pub(crate) fn same_entry(&self, other: &MenuNode) -> bool {
        self.name == other.name && self.view_name == other.view_name
    }
}
