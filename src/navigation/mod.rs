//! Navigation subsystem.
//!
//! # Data Flow
//! ```text
//! location ("/app/reservations/AB12?tab=guests")
//!     → request.rs (path, query, fragment)
//!     → history.rs (strip base, resolve, record current)
//!     → Resolution { location, request, matched }
//!     → Navigation { id, resolution } (navigate only)
//! ```

pub mod history;
pub mod request;

pub use history::{Navigation, NavigationError, Navigator, Resolution};
pub use request::{NavigationRequest, Query};
