//! JSON API next to the SPA entry: route listing, resolution, links and
//! programmatic navigation.

pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use crate::http::server::AppState;
use self::handlers::*;

pub fn setup_api_router() -> Router<AppState> {
    Router::new()
        .route("/api/status", get(get_status))
        .route("/api/routes", get(get_routes))
        .route("/api/resolve", get(get_resolve))
        .route("/api/href/{name}", get(get_href))
        .route("/api/navigation", get(get_navigation))
        .route("/api/navigate", post(post_navigate))
}
