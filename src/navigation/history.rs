//! History-mode navigation.
//!
//! # Responsibilities
//! - Strip the history base from incoming locations
//! - Resolve the remaining path against the current route table
//! - Record the current navigation (latest wins)
//! - Build base-prefixed links for named routes
//!
//! # Design Decisions
//! - Table and current navigation live behind `ArcSwap`: readers never block
//! - A reload swaps the whole table; a table is never mutated
//! - Navigation ids increase monotonically so an older navigation that
//!   finishes late cannot overwrite a newer one

use arc_swap::{ArcSwap, ArcSwapOption};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

use crate::navigation::request::NavigationRequest;
use crate::observability::metrics;
use crate::routing::{NotFound, Params, RouteError, RouteMatch, RouteTable};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("invalid location `{0}`")]
    InvalidLocation(String),

    #[error("`{location}` is outside the history base `{base}`")]
    OutsideBase { location: String, base: String },

    #[error(transparent)]
    NotFound(#[from] NotFound),
}

/// Outcome of resolving a location. Carries no identity, so resolving the
/// same location twice yields equal values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub location: String,
    pub request: NavigationRequest,
    pub matched: RouteMatch,
}

/// A resolution that became the current navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub id: u64,
    #[serde(flatten)]
    pub resolution: Resolution,
}

/// Resolves locations and holds the current navigation.
pub struct Navigator {
    table: ArcSwap<RouteTable>,
    /// Base without trailing slash; empty for `/`.
    base: String,
    current: ArcSwapOption<Navigation>,
    next_id: AtomicU64,
}

impl Navigator {
    pub fn new(table: RouteTable, base: &str) -> Self {
        Self {
            table: ArcSwap::from_pointee(table),
            base: base.trim_end_matches('/').to_string(),
            current: ArcSwapOption::empty(),
            next_id: AtomicU64::new(1),
        }
    }

    /// History base as configured, always ending in `/`.
    pub fn base(&self) -> String {
        format!("{}/", self.base)
    }

    /// Snapshot of the active table. Routes and fallback always come from the same reload.
    pub fn table(&self) -> Arc<RouteTable> {
        self.table.load_full()
    }

    /// Swap in a new table. In-flight lookups finish on the old one.
    pub fn replace_table(&self, table: RouteTable) {
        tracing::info!(routes = table.len(), "Route table replaced");
        self.table.store(Arc::new(table));
    }

    /// Resolve a location without touching any state.
    pub fn resolve(&self, location: &str) -> Result<Resolution, NavigationError> {
        self.resolve_on(&self.table(), location)
    }

    /// Resolve against a table snapshot taken by the caller.
    pub fn resolve_on(&self, table: &RouteTable, location: &str) -> Result<Resolution, NavigationError> {
        let request = NavigationRequest::parse(location)?;
        let path = self.strip_base(location, &request.path)?;

        let start = Instant::now();
        let result = table.resolve(path);
        metrics::record_resolution(
            result.as_ref().map(|m| m.name.as_str()).unwrap_or("none"),
            result.is_ok(),
            start,
        );

        let matched = result?;
        Ok(Resolution {
            location: location.to_string(),
            request,
            matched,
        })
    }

    /// Resolve a location and make it the current navigation.
    ///
    /// A failed navigation leaves the current one in place.
    pub fn navigate(&self, location: &str) -> Result<Arc<Navigation>, NavigationError> {
        self.navigate_on(&self.table(), location)
    }

    /// [`Navigator::navigate`] against a table snapshot taken by the caller.
    pub fn navigate_on(&self, table: &RouteTable, location: &str) -> Result<Arc<Navigation>, NavigationError> {
        let resolution = match self.resolve_on(table, location) {
            Ok(resolution) => resolution,
            Err(e) => {
                tracing::debug!(location = %location, error = %e, "Navigation rejected");
                metrics::record_navigation("rejected");
                return Err(e);
            }
        };

        let navigation = Arc::new(Navigation {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            resolution,
        });

        self.current.rcu(|current| match current {
            Some(existing) if existing.id > navigation.id => Some(existing.clone()),
            _ => Some(navigation.clone()),
        });

        tracing::debug!(
            id = navigation.id,
            route = %navigation.resolution.matched.name,
            location = %location,
            "Navigated"
        );
        metrics::record_navigation("completed");
        Ok(navigation)
    }

    pub fn current(&self) -> Option<Arc<Navigation>> {
        self.current.load_full()
    }

    /// Link to a named route, including the history base.
    pub fn href(&self, name: &str, params: &Params) -> Result<String, RouteError> {
        let path = self.table.load().href(name, params)?;
        if self.base.is_empty() {
            Ok(path)
        } else if path == "/" {
            Ok(self.base())
        } else {
            Ok(format!("{}{}", self.base, path))
        }
    }

    fn strip_base<'a>(&self, location: &str, path: &'a str) -> Result<&'a str, NavigationError> {
        if self.base.is_empty() {
            return Ok(path);
        }
        match path.strip_prefix(self.base.as_str()) {
            Some("") => Ok("/"),
            Some(rest) if rest.starts_with('/') => Ok(rest),
            _ => Err(NavigationError::OutsideBase {
                location: location.to_string(),
                base: self.base(),
            }),
        }
    }
}
