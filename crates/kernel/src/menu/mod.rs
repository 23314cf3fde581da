//! Admin navigation menus.
//!
//! Each admin view may declare a [`MenuNode`]. At startup the view registry
//! assembles those nodes into a forest of top-level groups; for every
//! rendered page a [`RootMenu`] marks which node is active.

mod forest;
mod node;
mod root;

pub use forest::assemble_forest;
pub use node::{DEFAULT_ICON, MenuNode};
pub use root::RootMenu;
