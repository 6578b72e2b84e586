//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (routing steps, request failures, lifecycle)
//!     → TraceLayer spans per HTTP request, tagged with x-request-id
//!
//! Consumers:
//!     → logging.rs subscriber (stdout, text or JSON)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows into every failure log line
//! - Routing steps log at trace level to stay cheap

pub mod logging;
