use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::request::request_id;
use crate::http::response::{ApiError, RenderBody};
use crate::http::server::AppState;
use crate::routing::Params;
use crate::view::View;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub base: String,
    pub routes: usize,
}

#[derive(Serialize)]
pub struct RouteSummary {
    pub name: String,
    pub path: String,
    pub view: View,
    pub params: Vec<String>,
}

#[derive(Deserialize)]
pub struct ResolveQuery {
    pub path: String,
}

#[derive(Serialize)]
pub struct HrefBody {
    pub href: String,
}

#[derive(Deserialize)]
pub struct NavigateBody {
    pub location: String,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        base: state.navigator.base(),
        routes: state.navigator.table().len(),
    })
}

pub async fn get_routes(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    let table = state.navigator.table();
    let routes = table
        .routes()
        .map(|r| RouteSummary {
            name: r.name.clone(),
            path: r.pattern.as_str().to_string(),
            view: r.view,
            params: r.pattern.param_names().map(str::to_string).collect(),
        })
        .collect();
    Json(routes)
}

/// Resolve without changing the current navigation.
pub async fn get_resolve(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<RenderBody>, ApiError> {
    let resolution = state.navigator.resolve(&query.path)?;
    Ok(Json(RenderBody::from(&resolution)))
}

pub async fn get_href(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<Params>,
) -> Result<Json<HrefBody>, ApiError> {
    let href = state.navigator.href(&name, &params)?;
    Ok(Json(HrefBody { href }))
}

pub async fn get_navigation(State(state): State<AppState>) -> Response {
    match state.navigator.current() {
        Some(nav) => Json(RenderBody::from(nav.as_ref())).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

pub async fn post_navigate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<NavigateBody>,
) -> Result<Json<RenderBody>, ApiError> {
    tracing::debug!(
        request_id = %request_id(&headers),
        location = %body.location,
        "Programmatic navigation"
    );
    let navigation = state.navigator.navigate(&body.location)?;
    Ok(Json(RenderBody::from(navigation.as_ref())))
}
