//! Routing depth ingress.
//!
//! A request forwarded between internal hops can arrive with its routing
//! depth pre-seeded in a header. The header is consumed here and removed so
//! it never reaches handlers or downstream calls.

use axum::http::HeaderMap;

/// Default name of the header carrying a pre-seeded routing depth.
pub const PATH_DEPTH_HEADER: &str = "request-path-depth";

/// Remove the depth header and return its value if it is a valid depth.
///
/// The header is stripped whether or not it parses.
pub fn take_depth_header(headers: &mut HeaderMap, name: &str) -> Option<usize> {
    let value = headers.remove(name)?;
    match value.to_str().ok().and_then(|v| v.trim().parse::<usize>().ok()) {
        Some(depth) => Some(depth),
        None => {
            tracing::debug!(header = name, value = ?value, "Ignoring malformed routing depth header");
            None
        }
    }
}
