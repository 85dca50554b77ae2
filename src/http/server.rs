//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router: JSON API plus the SPA entry fallback
//! - Wire up middleware (request ID, tracing, timeout)
//! - Resolve every other GET through the navigator; HEAD resolves without navigating
//! - Apply the table's fallback to unmatched paths
//! - Apply reloaded configuration without restarting

use axum::{
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    extract::State,
    Json, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api::setup_api_router;
use crate::config::RouterConfig;
use crate::http::request::{request_id, MakeRequestUuid};
use crate::http::response::{ApiError, RenderBody};
use crate::navigation::{NavigationError, Navigator};
use crate::observability::metrics;
use crate::routing::{Fallback, RouteError, RouteTable};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub navigator: Arc<Navigator>,
}

/// Host shell for the route table.
pub struct HttpServer {
    router: Router,
    state: AppState,
    config: RouterConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RouterConfig) -> Result<Self, RouteError> {
        let table = config.route_table()?;
        tracing::info!(routes = table.len(), base = %config.history.base, "Route table compiled");

        let state = AppState {
            navigator: Arc::new(Navigator::new(table, &config.history.base)),
        };

        let router = Self::build_router(&config, state.clone());
        Ok(Self {
            router,
            state,
            config,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RouterConfig, state: AppState) -> Router {
        Router::new()
            .merge(setup_api_router())
            .fallback(spa_entry)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.server.request_timeout_secs,
                    ))),
            )
    }

    /// Run the server until the shutdown signal fires.
    ///
    /// Configurations arriving on `config_updates` replace the route table,
    /// fallback included.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<RouterConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let state = self.state.clone();
        let base = self.config.history.base.clone();
        tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                apply_config(&state, &base, config);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Swap in a reloaded configuration. The history base is fixed for the process lifetime.
pub fn apply_config(state: &AppState, base: &str, config: RouterConfig) {
    if config.history.base != base {
        tracing::warn!(
            current = %base,
            requested = %config.history.base,
            "history.base changes need a restart; keeping the current base"
        );
    }

    match config.route_table() {
        Ok(table) => {
            state.navigator.replace_table(table);
            metrics::record_reload(true);
        }
        Err(e) => {
            tracing::error!(error = %e, "Reloaded routes rejected. Keeping current table.");
            metrics::record_reload(false);
        }
    }
}

/// Every path the API does not claim is an application location.
async fn spa_entry(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let request_id = request_id(&headers);
    let location = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    // One snapshot serves both the match and the fallback.
    let table = state.navigator.table();

    let rendered = if method == Method::HEAD {
        state
            .navigator
            .resolve_on(&table, location)
            .map(|resolution| RenderBody::from(&resolution))
    } else {
        state
            .navigator
            .navigate_on(&table, location)
            .map(|navigation| RenderBody::from(navigation.as_ref()))
    };

    match rendered {
        Ok(body) => {
            tracing::debug!(
                request_id = %request_id,
                route = %body.route,
                location = %location,
                "Rendering view"
            );
            Json(body).into_response()
        }
        Err(err @ (NavigationError::NotFound(_) | NavigationError::OutsideBase { .. })) => {
            tracing::warn!(request_id = %request_id, location = %location, "No route matched");
            fallback(&state, &table, err)
        }
        Err(err) => ApiError::from(err).into_response(),
    }
}

fn fallback(state: &AppState, table: &RouteTable, err: NavigationError) -> Response {
    match table.fallback() {
        Fallback::Redirect(target) => {
            let base = state.navigator.base();
            let location = format!("{}{}", base.trim_end_matches('/'), target);
            match HeaderValue::from_str(&location) {
                Ok(value) => (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, value)]).into_response(),
                Err(_) => {
                    tracing::error!(location = %location, "Fallback redirect is not a valid header value");
                    ApiError::from(err).into_response()
                }
            }
        }
        Fallback::NotFound => ApiError::from(err).into_response(),
    }
}
