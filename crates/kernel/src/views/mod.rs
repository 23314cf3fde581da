//! The admin views shipped with the crate.

mod login;
mod user;

use std::sync::Arc;

use crate::menu::MenuNode;
use crate::view::{AdminView, RegistryError, ViewRegistry, handler};

pub use login::is_safe_redirect;

/// Register every built-in view.
pub fn builtin_views() -> Result<ViewRegistry, RegistryError> {
    let system = Arc::new(
        MenuNode::new("System")
            .icon("fa-cogs")
            .description("Accounts and settings")
            .sort(10),
    );

    ViewRegistry::from_views(vec![
        AdminView::new("IndexView")
            .menu(
                MenuNode::new("Dashboard")
                    .icon("fa-dashboard")
                    .description("Overview")
                    .sort(100),
            )
            .template("adminlte/index.html"),
        AdminView::new("LoginView")
            .login_required(false)
            .template("adminlte/login.html")
            .get(handler(login::login_form))
            .post(handler(login::login_submit)),
        AdminView::new("LogoutView")
            .login_required(false)
            .get(handler(login::logout)),
        AdminView::new("UserListView")
            .menu(
                MenuNode::new("Users")
                    .icon("fa-users")
                    .parent(system.clone()),
            )
            .template("adminlte/user_list.html")
            .get(handler(user::user_list)),
        AdminView::new("UserProfileView")
            .menu(
                MenuNode::new("Profile")
                    .icon("fa-user")
                    .parent(system),
            )
            .template("adminlte/user_profile.html")
            .get(handler(user::user_profile)),
    ])
}
