//! Response shapes for the host shell.
//!
//! # Responsibilities
//! - Describe what the front end should render for a navigation
//! - Map routing and navigation errors to HTTP status codes
//!
//! # Design Decisions
//! - Every error body is JSON with a stable machine-readable `error` code
//! - NotFound is 404, malformed input is 400

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::navigation::{Navigation, NavigationError, Query, Resolution};
use crate::routing::{Params, RouteError};
use crate::view::View;

/// What the rendering layer mounts for a navigation.
#[derive(Debug, Clone, Serialize)]
pub struct RenderBody {
    /// Absent for a resolution that did not navigate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation_id: Option<u64>,
    pub route: String,
    pub view: View,
    pub params: Params,
    pub query: Query,
    pub fragment: Option<String>,
}

impl From<&Resolution> for RenderBody {
    fn from(resolution: &Resolution) -> Self {
        Self {
            navigation_id: None,
            route: resolution.matched.name.clone(),
            view: resolution.matched.view,
            params: resolution.matched.params.clone(),
            query: resolution.request.query.clone(),
            fragment: resolution.request.fragment.clone(),
        }
    }
}

impl From<&Navigation> for RenderBody {
    fn from(nav: &Navigation) -> Self {
        Self {
            navigation_id: Some(nav.id),
            ..Self::from(&nav.resolution)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// An error answer: status plus JSON body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error,
                message: message.into(),
            },
        }
    }
}

impl From<NavigationError> for ApiError {
    fn from(err: NavigationError) -> Self {
        let (status, code) = match &err {
            NavigationError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            NavigationError::OutsideBase { .. } => (StatusCode::NOT_FOUND, "outside_base"),
            NavigationError::InvalidLocation(_) => (StatusCode::BAD_REQUEST, "invalid_location"),
        };
        Self::new(status, code, err.to_string())
    }
}

impl From<RouteError> for ApiError {
    fn from(err: RouteError) -> Self {
        let (status, code) = match &err {
            RouteError::UnknownRoute(_) => (StatusCode::NOT_FOUND, "unknown_route"),
            RouteError::MissingParam { .. } => (StatusCode::BAD_REQUEST, "missing_param"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "route_table"),
        };
        Self::new(status, code, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
