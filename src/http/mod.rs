//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, timeout, tracing)
//!     → request.rs (buffer body, seed depth, typed Request)
//!     → routing layer walks the path one segment at a time
//!     → response.rs (plain-text bodies for handlers and errors)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, Request, X_REQUEST_ID};
pub use server::HttpServer;
