//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::observability::LogFormat;
use crate::routing::{Fallback, Ordering, RouteError, RouteTable, RouteTableBuilder};
use crate::view::View;

/// Root configuration for the router shell.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,

    /// History mode settings (base path).
    pub history: HistoryConfig,

    /// Route table construction options.
    pub table: TableConfig,

    /// Behavior for paths no route matches.
    pub fallback: FallbackConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route declarations in resolution order. Empty means the built-in table.
    pub routes: Vec<RouteConfig>,
}

impl RouterConfig {
    fn builder(&self) -> RouteTableBuilder {
        let builder = RouteTable::builder()
            .ordering(self.table.ordering)
            .fallback(self.fallback.to_fallback());
        if self.routes.is_empty() {
            return builder.reservation_routes();
        }
        self.routes
            .iter()
            .fold(builder, |b, r| b.route(r.path.clone(), r.name.clone(), r.view))
    }

    /// Every problem with the routes and the fallback redirect.
    pub fn route_errors(&self) -> Vec<RouteError> {
        self.builder().check()
    }

    /// Compile the configured routes, or the built-in ones if none are declared.
    pub fn route_table(&self) -> Result<RouteTable, RouteError> {
        self.builder().build()
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// History mode configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Base path the application is served under. Starts and ends with `/`.
    pub base: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            base: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TableConfig {
    pub ordering: Ordering,
}

/// What the shell does when no route matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Answer 404 with a JSON body naming the path.
    #[default]
    NotFound,
    /// Redirect to `redirect_to`.
    Redirect,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub policy: FallbackPolicy,

    /// Redirect target for the `redirect` policy, relative to the history base.
    pub redirect_to: Option<String>,
}

impl FallbackConfig {
    /// The table-level fallback. A redirect policy without a target is a
    /// validation error and degrades to `NotFound` here.
    pub fn to_fallback(&self) -> Fallback {
        match (self.policy, &self.redirect_to) {
            (FallbackPolicy::Redirect, Some(target)) => Fallback::Redirect(target.clone()),
            _ => Fallback::NotFound,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// A single route declaration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path pattern, e.g. `/reservations/:reservationRefNo`.
    pub path: String,

    /// Unique logical name, e.g. `reservations.show`.
    pub name: String,

    /// View rendered for this route.
    pub view: View,
}
