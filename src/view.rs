//! View handles.
//!
//! The router never looks inside a view. A `View` is an opaque handle the
//! host rendering layer maps to the component it actually mounts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Renderable unit a route points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum View {
    #[serde(rename = "HomeView")]
    Home,
    #[serde(rename = "ReservationCreate")]
    ReservationCreate,
    #[serde(rename = "ReservationShow")]
    ReservationShow,
}

impl View {
    /// Component name as the front end registers it.
    pub fn component(&self) -> &'static str {
        match self {
            View::Home => "HomeView",
            View::ReservationCreate => "ReservationCreate",
            View::ReservationShow => "ReservationShow",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component())
    }
}
