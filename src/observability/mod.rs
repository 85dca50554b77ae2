//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routing, navigation, config reload and the HTTP shell produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log line of a request
//! - Metrics are cheap (atomic increments)
//! - The exporter is optional and off by default

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LogFormat};
