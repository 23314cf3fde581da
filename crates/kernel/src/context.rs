//! Template context shared by every admin page.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::menu::RootMenu;
use crate::state::AppState;

/// Display name used for visitors who are not logged in.
pub const ANONYMOUS_NICKNAME: &str = "Guest";

/// The `current_user` block of the template context.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserContext {
    pub nickname: String,
    pub avatar_url: String,
    pub date_joined: Option<DateTime<Utc>>,
}

impl CurrentUserContext {
    pub fn new(user: &CurrentUser, avatar_url: &str) -> Self {
        match user.user() {
            Some(account) => Self {
                nickname: account.display_name(),
                avatar_url: avatar_url.to_string(),
                date_joined: account.date_joined,
            },
            None => Self {
                nickname: ANONYMOUS_NICKNAME.to_string(),
                avatar_url: avatar_url.to_string(),
                date_joined: None,
            },
        }
    }
}

/// Build the admin context.
///
/// Adds: `ROOT_MENU`, `current_user`, `user_authenticated`, `urls` (route
/// name to path) and `admin_prefix`.
pub fn admin_context(
    state: &AppState,
    user: &CurrentUser,
    current_view_name: Option<&str>,
) -> tera::Context {
    let root_menu = RootMenu::new(current_view_name, state.menus());

    let mut context = tera::Context::new();
    context.insert("ROOT_MENU", &root_menu);
    context.insert(
        "current_user",
        &CurrentUserContext::new(user, &state.config().avatar_url),
    );
    context.insert("user_authenticated", &user.is_authenticated());
    context.insert("urls", &state.urls().named_paths());
    context.insert("admin_prefix", state.urls().prefix());
    context
}
