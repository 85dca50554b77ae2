//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect invalid, duplicate and shadowed routes
//! - Check that a redirect fallback is a plain path landing on a real route
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::{FallbackPolicy, RouterConfig};
use crate::routing::RouteError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("server.request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("history.base `{0}` must start and end with `/`")]
    HistoryBase(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    MetricsAddress(String),

    #[error("routes: {0}")]
    Route(#[from] RouteError),

    #[error("fallback.redirect_to is required for the redirect policy")]
    MissingRedirect,
}

pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.server.bind_address.clone()));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let base = &config.history.base;
    let base_ok = base.starts_with('/')
        && base.ends_with('/')
        && !base.chars().any(|c| c.is_control() || c.is_whitespace());
    if !base_ok {
        errors.push(ValidationError::HistoryBase(base.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    errors.extend(config.route_errors().into_iter().map(ValidationError::from));

    if config.fallback.policy == FallbackPolicy::Redirect && config.fallback.redirect_to.is_none() {
        errors.push(ValidationError::MissingRedirect);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;
    use crate::view::View;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&RouterConfig::default()), Ok(()));
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = RouterConfig::default();
        config.server.bind_address = "nowhere".into();
        config.server.request_timeout_secs = 0;
        config.history.base = "app".into();
        config.routes = vec![
            RouteConfig {
                path: "/reservations/:reservationRefNo".into(),
                name: "reservations.show".into(),
                view: View::ReservationShow,
            },
            RouteConfig {
                path: "/reservations/create".into(),
                name: "reservations.create".into(),
                view: View::ReservationCreate,
            },
        ];
        config.fallback.policy = FallbackPolicy::Redirect;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5, "{:?}", errors);
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::MissingRedirect));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::Route(RouteError::Shadowed { .. }))));
    }

    #[test]
    fn test_redirect_target_must_resolve() {
        let mut config = RouterConfig::default();
        config.fallback.policy = FallbackPolicy::Redirect;
        config.fallback.redirect_to = Some("/nowhere".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::Route(RouteError::InvalidFallback { .. })]
        ));

        config.fallback.redirect_to = Some("/".into());
        config.history.base = "/app/".into();
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_redirect_target_must_be_header_safe() {
        for target in ["/reservations/a\nb", "/reservations/a\tb", "/reservations/a b", "/\\evil.example/"] {
            let mut config = RouterConfig::default();
            config.fallback.policy = FallbackPolicy::Redirect;
            config.fallback.redirect_to = Some(target.into());
            let errors = validate_config(&config).unwrap_err();
            assert!(
                matches!(
                    errors.as_slice(),
                    [ValidationError::Route(RouteError::InvalidFallback { .. })]
                ),
                "{:?}: {:?}",
                target,
                errors
            );
        }
    }

    #[test]
    fn test_history_base_rejects_control_characters() {
        let mut config = RouterConfig::default();
        config.history.base = "/a\nb/".into();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::HistoryBase("/a\nb/".into())])
        );
    }
}
