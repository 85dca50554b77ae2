//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, route table checks)
//!     → RouterConfig (validated, immutable)
//!     → RouteTable compiled from it, shared via Arc
//!
//! On reload (file change or SIGHUP):
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → atomic swap of the RouteTable
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - No `[[routes]]` means the built-in reservation table

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{
    FallbackConfig, FallbackPolicy, HistoryConfig, ObservabilityConfig, RouteConfig, RouterConfig,
    ServerConfig, TableConfig,
};
pub use validation::ValidationError;
