//! The request value handed to view handlers.

use axum::body::Bytes;
use axum::http::Method;
use axum::response::Response;
use tower_sessions::Session;

use crate::auth::CurrentUser;
use crate::context::admin_context;
use crate::query::QueryParams;
use crate::routes::helpers::render_admin_template;
use crate::state::AppState;

/// Everything a view handler needs about the current request.
#[derive(Clone)]
pub struct ViewRequest {
    pub state: AppState,
    pub session: Session,
    pub user: CurrentUser,
    pub method: Method,
    /// Full request path, admin prefix included.
    pub path: String,
    pub query: QueryParams,
    pub body: Bytes,
    /// Canonical name of the resolved view.
    pub view_name: String,
}

impl ViewRequest {
    /// Path and query string, as used for the login `next` parameter.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query.encode())
        }
    }

    /// Render `template` with the admin context plus `extra`.
    pub fn render(&self, template: &str, extra: tera::Context) -> Response {
        let mut context = admin_context(&self.state, &self.user, Some(&self.view_name));
        context.insert("request_path", &self.path);
        context.extend(extra);
        render_admin_template(&self.state, template, context)
    }
}
