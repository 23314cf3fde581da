//! Admin view dispatcher.
//!
//! Every path under the admin prefix goes through [`dispatch`], which
//! resolves it against the URL table, applies the staff check and then
//! selects the view's handler by HTTP method.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use tower_sessions::Session;
use tracing::debug;

use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::guard::{AccessGuard, login_redirect};
use crate::query::QueryParams;
use crate::state::AppState;
use crate::view::ViewRequest;

/// Create the admin router mounted at `prefix`.
pub fn router(prefix: &str) -> Router<AppState> {
    let prefix = prefix.trim_end_matches('/');

    if prefix.is_empty() {
        return Router::new()
            .route("/", any(dispatch))
            .route("/{*path}", any(dispatch));
    }

    Router::new()
        .route(prefix, any(dispatch))
        .route(&format!("{prefix}/"), any(dispatch))
        .route(&format!("{prefix}/{{*path}}"), any(dispatch))
}

/// Resolve, guard and dispatch one admin request.
async fn dispatch(
    State(state): State<AppState>,
    session: Session,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();

    let Some(matched) = state.urls().resolve(&path) else {
        debug!(path = %path, "no admin view matches");
        return AppError::NotFound.into_response();
    };
    let view = matched.view.clone();

    let user = CurrentUser::from_session(&state, &session).await;
    let query = QueryParams::parse(uri.query().unwrap_or_default());

    let guard = AccessGuard::new().login_required(view.requires_login());
    if !guard.permits(&user) {
        let next = match uri.query() {
            Some(q) if !q.is_empty() => format!("{path}?{q}"),
            _ => path.clone(),
        };
        return login_redirect(state.login_url(), &next);
    }

    let Some(handler) = view.handler_for(&method) else {
        return method_not_allowed(&view.allowed_methods());
    };

    debug!(view = %view.class_name(), method = %method, "dispatching admin view");

    let request = ViewRequest {
        view_name: view.canonical_name(),
        state,
        session,
        user,
        method,
        path,
        query,
        body,
    };
    handler(request).await
}

/// 405 with an `Allow` header listing `allowed`.
fn method_not_allowed(allowed: &[Method]) -> Response {
    let allow = allowed
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    let mut response = StatusCode::METHOD_NOT_ALLOWED.into_response();
    if let Ok(value) = HeaderValue::from_str(&allow) {
        response.headers_mut().insert(header::ALLOW, value);
    }
    response
}
