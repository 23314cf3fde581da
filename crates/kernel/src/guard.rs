//! Staff-only access guard.
//!
//! One predicate, three ways to apply it:
//! - the view dispatcher checks it before choosing a handler,
//! - [`AccessGuard::wrap`] decorates a single [`ViewHandler`],
//! - [`require_staff`] is axum middleware for plain routes.
//!
//! A failed check is not an error: the client is redirected to the login
//! view with a `next` parameter pointing back at the requested page.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;
use tracing::debug;
use url::form_urlencoded;

use crate::auth::CurrentUser;
use crate::state::AppState;
use crate::view::{HandlerFuture, ViewHandler, ViewRequest};

/// Route name of the login view.
pub const LOGIN_ROUTE: &str = "adminlte.login";

/// Query parameter carrying the page to return to after login.
pub const NEXT_PARAM: &str = "next";

/// Gate requiring an authenticated staff user.
#[derive(Debug, Clone, Copy)]
pub struct AccessGuard {
    login_required: bool,
}

impl Default for AccessGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessGuard {
    /// A guard that requires staff.
    pub fn new() -> Self {
        Self {
            login_required: true,
        }
    }

    /// Turn the check on or off for one handler.
    pub fn login_required(mut self, required: bool) -> Self {
        self.login_required = required;
        self
    }

    /// Whether `user` may proceed.
    pub fn permits(&self, user: &CurrentUser) -> bool {
        !self.login_required || user.is_staff()
    }

    /// Wrap `handler` so it only runs for permitted users.
    ///
    /// With the check turned off the handler is returned untouched.
    pub fn wrap(self, handler: ViewHandler) -> ViewHandler {
        if !self.login_required {
            return handler;
        }

        Arc::new(move |request: ViewRequest| -> HandlerFuture {
            if self.permits(&request.user) {
                handler(request)
            } else {
                let response = login_redirect(request.state.login_url(), &request.path_and_query());
                Box::pin(async move { response })
            }
        })
    }
}

/// Redirect to `login_url`, remembering `next`.
pub fn login_redirect(login_url: &str, next: &str) -> Response {
    debug!(next = %next, "staff check failed; redirecting to login");

    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(NEXT_PARAM, next)
        .finish();
    Redirect::to(&format!("{login_url}?{query}")).into_response()
}

/// Middleware applying the staff check to plain axum routes.
pub async fn require_staff(
    State(state): State<AppState>,
    session: Session,
    request: Request<Body>,
    next: Next,
) -> Response {
    let user = CurrentUser::from_session(&state, &session).await;

    if AccessGuard::new().permits(&user) {
        return next.run(request).await;
    }

    let target = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    login_redirect(state.login_url(), &target)
}
