//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes in resolution order
//! - Look up the matching route for a path
//! - Return the matched route or an explicit `NotFound`
//! - Build links for named routes
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) segment scan (acceptable for typical route counts)
//! - Explicit `NotFound` rather than silent default
//! - Unreachable routes are a construction error, not a runtime surprise

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::routing::error::{NotFound, RouteError};
use crate::routing::pattern::{split_path, Params, PathPattern};
use crate::view::View;

/// How the table orders routes before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ordering {
    /// Declaration order. Shadowed routes are rejected.
    #[default]
    Declared,
    /// Stable sort so literal segments are tried before parameters.
    Specificity,
}

/// What the host does with a path no route matches.
///
/// Lives in the table so a reload swaps routes and fallback together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Fallback {
    #[default]
    NotFound,
    /// Redirect to this path (relative to the history base).
    Redirect(String),
}

/// A compiled route.
#[derive(Debug, Clone)]
pub struct Route {
    pub name: String,
    pub pattern: PathPattern,
    pub view: View,
}

/// Outcome of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub name: String,
    pub pattern: String,
    pub view: View,
    pub params: Params,
}

/// Ordered, immutable route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    fallback: Fallback,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// The reservation application's routes.
    pub fn reservations() -> Self {
        Self::builder()
            .reservation_routes()
            .build()
            .expect("built-in route table is valid")
    }

    /// Resolve a path to the first route that matches it in full.
    pub fn resolve(&self, path: &str) -> Result<RouteMatch, NotFound> {
        let not_found = || NotFound {
            path: path.to_string(),
        };
        let segments = split_path(path).ok_or_else(not_found)?;

        self.routes
            .iter()
            .find_map(|route| {
                route.pattern.match_segments(&segments).map(|params| RouteMatch {
                    name: route.name.clone(),
                    pattern: route.pattern.as_str().to_string(),
                    view: route.view,
                    params,
                })
            })
            .ok_or_else(not_found)
    }

    /// Build the path for a named route.
    pub fn href(&self, name: &str, params: &Params) -> Result<String, RouteError> {
        let route = self
            .get(name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;

        route
            .pattern
            .build(params)
            .map_err(|param| RouteError::MissingParam {
                route: name.to_string(),
                param,
            })
    }

    pub fn fallback(&self) -> &Fallback {
        &self.fallback
    }

    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Routes in resolution order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::reservations()
    }
}

/// Collects route declarations and validates them into a [`RouteTable`].
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    declared: Vec<(String, String, View)>,
    ordering: Ordering,
    fallback: Fallback,
}

impl RouteTableBuilder {
    pub fn route(mut self, pattern: impl Into<String>, name: impl Into<String>, view: View) -> Self {
        self.declared.push((pattern.into(), name.into(), view));
        self
    }

    /// Declare the reservation application's routes.
    pub fn reservation_routes(self) -> Self {
        self.route("/", "home", View::Home)
            .route("/reservations/create", "reservations.create", View::ReservationCreate)
            .route("/reservations/:reservationRefNo", "reservations.show", View::ReservationShow)
    }

    pub fn ordering(mut self, ordering: Ordering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Compile patterns and check names and reachability. Stops at the first problem.
    pub fn build(self) -> Result<RouteTable, RouteError> {
        match self.check().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(RouteTable {
                routes: self.compile_ordered().unwrap_or_default(),
                fallback: self.fallback,
            }),
        }
    }

    /// Every problem with the declared routes, in declaration order.
    pub fn check(&self) -> Vec<RouteError> {
        let mut errors = Vec::new();
        let mut names = HashSet::new();

        for (_, name, _) in &self.declared {
            if !names.insert(name.as_str()) {
                errors.push(RouteError::DuplicateName(name.clone()));
            }
        }

        match self.compile_ordered() {
            Ok(routes) => {
                errors.extend(shadowing(&routes));
                if let Fallback::Redirect(target) = &self.fallback {
                    errors.extend(check_redirect(target, routes));
                }
            }
            Err(pattern_errors) => errors.extend(pattern_errors),
        }
        errors
    }

    fn compile_ordered(&self) -> Result<Vec<Route>, Vec<RouteError>> {
        let mut routes = Vec::with_capacity(self.declared.len());
        let mut errors = Vec::new();

        for (pattern, name, view) in &self.declared {
            match PathPattern::parse(pattern) {
                Ok(pattern) => routes.push(Route {
                    name: name.clone(),
                    pattern,
                    view: *view,
                }),
                Err(e) => errors.push(e),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        if self.ordering == Ordering::Specificity {
            routes.sort_by_key(|r| r.pattern.specificity());
        }
        Ok(routes)
    }
}

/// A redirect target goes out verbatim as a `Location` header, so it must
/// already be a plain absolute path that lands on a route.
fn check_redirect(target: &str, routes: Vec<Route>) -> Option<RouteError> {
    let invalid = |reason: &str| {
        Some(RouteError::InvalidFallback {
            target: target.to_string(),
            reason: reason.to_string(),
        })
    };

    if !target.starts_with('/') || target.starts_with("//") || target.contains('\\') {
        return invalid("must be an absolute path");
    }
    if target.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return invalid("must not contain whitespace or control characters");
    }

    let path = target.split(|c: char| c == '?' || c == '#').next().unwrap_or(target);
    let table = RouteTable {
        routes,
        fallback: Fallback::NotFound,
    };
    match table.resolve(path) {
        Ok(_) => None,
        Err(_) => invalid("does not resolve to a route"),
    }
}

fn shadowing(routes: &[Route]) -> Vec<RouteError> {
    let mut errors = Vec::new();
    for (i, later) in routes.iter().enumerate() {
        if let Some(earlier) = routes[..i].iter().find(|r| r.pattern.covers(&later.pattern)) {
            errors.push(RouteError::Shadowed {
                route: later.name.clone(),
                pattern: later.pattern.as_str().to_string(),
                shadowed_by: earlier.name.clone(),
            });
        }
    }
    errors
}
