//! Reservation application route table and its host shell.

pub mod api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod navigation;
pub mod observability;
pub mod routing;
pub mod view;

pub use config::schema::RouterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use navigation::Navigator;
pub use routing::{RouteMatch, RouteTable};
pub use view::View;
