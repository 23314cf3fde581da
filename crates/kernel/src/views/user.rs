//! User list and profile pages.

use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::pager::Pager;
use crate::view::ViewRequest;

/// Paginated list of every account.
pub(super) async fn user_list(request: ViewRequest) -> Response {
    let users = request.state.users();
    let default_size = request.state.config().default_page_size;

    let pager = match Pager::from_request_with_default_size(users, &request.query, default_size) {
        Ok(pager) => pager,
        Err(e) => return AppError::from(e).into_response(),
    };

    let mut context = tera::Context::new();
    context.insert("pager", &pager);
    request.render("adminlte/user_list.html", context)
}

/// The logged-in user's own account.
pub(super) async fn user_profile(request: ViewRequest) -> Response {
    let mut context = tera::Context::new();
    if let Some(account) = request.user.user() {
        context.insert("account", account);
    }
    request.render("adminlte/user_profile.html", context)
}
