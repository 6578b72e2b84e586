//! Request handling and transformation.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) as early as possible
//! - Buffer the inbound request into an immutable, cheaply cloned head
//! - Carry the routing depth as a typed field next to the head
//! - Expose form fields from the query string and url-encoded bodies
//!
//! # Design Decisions
//! - The original path is never rewritten; depth is the only position marker
//! - `with_depth` shares the head and leaves the source request untouched
//! - Body form fields win over query fields with the same name

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    http::{header, HeaderMap, HeaderName, Method, Uri},
};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Stamps each inbound request with a fresh UUID v4.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

#[derive(Debug)]
struct Head {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    remote_addr: Option<SocketAddr>,
}

/// An inbound request as seen by routers and handlers.
#[derive(Debug, Clone)]
pub struct Request {
    head: Arc<Head>,
    depth: usize,
}

impl Request {
    /// Build a request at depth 0 from a buffered HTTP request.
    pub fn from_http(req: axum::http::Request<Bytes>) -> Self {
        let (parts, body) = req.into_parts();
        let remote_addr = parts
            .extensions
            .get::<axum::extract::ConnectInfo<SocketAddr>>()
            .map(|info| info.0);

        Self {
            head: Arc::new(Head {
                method: parts.method,
                uri: parts.uri,
                headers: parts.headers,
                body,
                remote_addr,
            }),
            depth: 0,
        }
    }

    /// Number of path segments already consumed by routers.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Same request at a different depth.
    pub fn with_depth(&self, depth: usize) -> Self {
        Self {
            head: Arc::clone(&self.head),
            depth,
        }
    }

    /// The original, uncleaned request path.
    pub fn path(&self) -> &str {
        self.head.uri.path()
    }

    pub fn method(&self) -> &Method {
        &self.head.method
    }

    pub fn uri(&self) -> &Uri {
        &self.head.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.head.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.head.body
    }

    pub fn remote_addr(&self) -> Option<SocketAddr> {
        self.head.remote_addr
    }

    pub fn request_id(&self) -> Option<&str> {
        self.head
            .headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
    }

    /// First value of the named form field.
    pub fn form_value(&self, key: &str) -> Option<String> {
        if self.has_form_body() {
            let found = url::form_urlencoded::parse(&self.head.body)
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned());
            if found.is_some() {
                return found;
            }
        }

        let query = self.head.uri.query()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    fn has_form_body(&self) -> bool {
        self.head
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false)
    }
}
