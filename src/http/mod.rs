//! HTTP host shell.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → /api/* handlers, or the SPA entry for any other path
//!     → navigator (strip base, resolve, record current navigation)
//!     → response.rs (render descriptor, or fallback / error JSON)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use response::{ApiError, RenderBody};
pub use server::{AppState, HttpServer};
