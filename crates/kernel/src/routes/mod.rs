//! HTTP route handlers.

pub mod admin;
pub mod api;
pub mod health;
pub mod helpers;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::session;
use crate::state::AppState;

/// Build the full application router.
///
/// Shared by the binary and the integration tests so both exercise the same
/// routes and layers.
pub fn app(state: AppState) -> Router {
    let config = state.config();
    let session_layer = session::create_session_layer(
        session::same_site_from_str(&config.cookie_same_site),
        config.secure_cookies,
    );

    Router::new()
        .merge(health::router())
        .merge(api::router(state.clone()))
        .merge(admin::router(state.urls().prefix()))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        // Middleware layers (last added = first executed in request flow):
        // TraceLayer → compression → session → routes
        .layer(session_layer)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
