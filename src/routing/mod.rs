//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (original path, depth)
//!     → depth.rs (seed depth from an internal-hop header, strip it)
//!     → dispatch.rs (router reads the segment at its depth)
//!     → path.rs (clean path, shift to the segment)
//!     → next Router (depth + 1) or terminal Handler
//! ```
//!
//! # Design Decisions
//! - Each router sees exactly one segment and never its position
//! - The request path is never truncated; depth alone tracks position
//! - Strictly sequential: segment N resolves before segment N + 1
//! - No shared mutable state: routers are rebuilt per request step

pub mod depth;
pub mod dispatch;
pub mod path;

pub use depth::{take_depth_header, PATH_DEPTH_HEADER};
pub use dispatch::{Dispatchable, Handler, Router};
pub use path::{clean_path, shift_path};
