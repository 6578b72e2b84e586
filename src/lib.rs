//! Segment-at-a-time HTTP router with swappable request environments.

pub mod app;
pub mod config;
pub mod env;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use env::Environment;
pub use error::{Error, StatusError};
pub use http::{HttpServer, Request};
pub use lifecycle::Shutdown;
pub use routing::Dispatchable;
