//! Navigation request parsing.
//!
//! A location such as `/reservations/AB12?tab=guests#notes` is split into
//! the path handed to the route table, the decoded query and the fragment.
//! The path is passed on exactly as written so the navigator and the route
//! table always see the same text.

use serde::Serialize;
use std::collections::BTreeMap;
use url::form_urlencoded;

use crate::navigation::history::NavigationError;

/// Decoded query values, repeated keys kept in order.
pub type Query = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationRequest {
    /// Path as given, still percent-encoded.
    pub path: String,
    pub query: Query,
    pub fragment: Option<String>,
}

impl NavigationRequest {
    /// Parse an absolute-path location.
    ///
    /// Rejects anything a browser could read as another origin (`//host`,
    /// `/\host`) and any control character.
    pub fn parse(location: &str) -> Result<Self, NavigationError> {
        let location = if location.is_empty() { "/" } else { location };
        if !location.starts_with('/')
            || location.starts_with("//")
            || location.contains('\\')
            || location.chars().any(char::is_control)
        {
            return Err(NavigationError::InvalidLocation(location.to_string()));
        }

        let (rest, fragment) = match location.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (location, None),
        };
        let (path, raw_query) = rest.split_once('?').unwrap_or((rest, ""));

        let mut query = Query::new();
        for (key, value) in form_urlencoded::parse(raw_query.as_bytes()) {
            query
                .entry(key.into_owned())
                .or_default()
                .push(value.into_owned());
        }

        Ok(Self {
            path: path.to_string(),
            query,
            fragment,
        })
    }

    /// First value for a query key.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.get(key).and_then(|v| v.first()).map(String::as_str)
    }
}
