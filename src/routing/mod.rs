//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation (path)
//!     → router.rs (route lookup, declaration order)
//!     → pattern.rs (segment-wise match, parameter capture)
//!     → Return: RouteMatch or NotFound
//!
//! Route Compilation (at startup / reload):
//!     (pattern, name, view)[]
//!     → Parse patterns
//!     → Optional specificity sort
//!     → Reject duplicate names and shadowed routes
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by declaration)

pub mod error;
pub mod pattern;
pub mod router;

pub use error::{NotFound, RouteError};
pub use pattern::{Params, PathPattern, Segment};
pub use router::{Fallback, Ordering, Route, RouteMatch, RouteTable, RouteTableBuilder};
