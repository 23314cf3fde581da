//! Staff-only JSON endpoints describing the admin site.

use axum::extract::State;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::guard::require_staff;
use crate::menu::MenuNode;
use crate::state::AppState;

/// One row of the URL table.
#[derive(Debug, Serialize)]
struct RouteInfo {
    pattern: String,
    name: Option<String>,
    view: String,
    login_required: bool,
}

/// The sorted menu forest.
async fn list_menus(State(state): State<AppState>) -> Json<Vec<MenuNode>> {
    Json(state.menus().to_vec())
}

/// The URL table, in resolution order.
async fn list_routes(State(state): State<AppState>) -> Json<Vec<RouteInfo>> {
    let routes = state
        .urls()
        .patterns()
        .iter()
        .map(|p| RouteInfo {
            pattern: p.pattern().to_string(),
            name: p.name().map(str::to_string),
            view: p.view().class_name().to_string(),
            login_required: p.view().requires_login(),
        })
        .collect();
    Json(routes)
}

/// Create the API router. Every route requires a staff user.
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/admin/menus", get(list_menus))
        .route("/api/admin/routes", get(list_routes))
        .route_layer(from_fn_with_state(state, require_staff))
}
