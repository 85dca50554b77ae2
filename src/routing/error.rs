//! Routing errors.

use thiserror::Error;

/// Problems building a route table or a link from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("invalid path pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("route name `{0}` is declared more than once")]
    DuplicateName(String),

    #[error("route `{route}` ({pattern}) is unreachable: `{shadowed_by}` is declared earlier and matches every path it would")]
    Shadowed {
        route: String,
        pattern: String,
        shadowed_by: String,
    },

    #[error("fallback redirect `{target}` {reason}")]
    InvalidFallback { target: String, reason: String },

    #[error("no route named `{0}`")]
    UnknownRoute(String),

    #[error("route `{route}` needs a non-empty value for `{param}`")]
    MissingParam { route: String, param: String },
}

/// No route matched the requested path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no route matches `{path}`")]
pub struct NotFound {
    pub path: String,
}
