//! Per-request active-menu resolution.

use serde::Serialize;

use super::node::MenuNode;

/// The menu forest as seen by one request.
///
/// Borrowed from the cached forest and rebuilt for every page render. Exposed
/// to templates as `ROOT_MENU`.
#[derive(Debug, Serialize)]
pub struct RootMenu<'a> {
    /// Canonical name of the view being rendered.
    pub current_view_name: Option<&'a str>,
    /// Node linking to the current view, if any.
    pub current_menu: Option<&'a MenuNode>,
    /// Top-level node owning `current_menu` when it is a child.
    pub parent_menu: Option<&'a MenuNode>,
    /// Every top-level node, in forest order.
    pub menus: Vec<&'a MenuNode>,
}

impl<'a> RootMenu<'a> {
    /// Resolve the active node for `current_view_name` within `init_menus`.
    pub fn new(current_view_name: Option<&'a str>, init_menus: &'a [MenuNode]) -> Self {
        let mut root = Self {
            current_view_name,
            current_menu: None,
            parent_menu: None,
            menus: Vec::with_capacity(init_menus.len()),
        };

        for menu in init_menus {
            root.add_menu(menu);
        }

        root
    }

    /// Append a top-level node, marking it (or one of its children) current
    /// when nothing earlier matched.
    pub fn add_menu(&mut self, menu: &'a MenuNode) -> &mut Self {
        if self.current_menu.is_none()
            && let Some(view_name) = self.current_view_name
        {
            if menu.active(view_name) {
                self.current_menu = Some(menu);
            } else if let Some(sub_menu) = menu.sub_menus.iter().find(|m| m.active(view_name)) {
                self.current_menu = Some(sub_menu);
                self.parent_menu = Some(menu);
            }
        }

        self.menus.push(menu);
        self
    }
}
