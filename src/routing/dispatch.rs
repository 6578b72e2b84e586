//! Segment-at-a-time dispatch.
//!
//! # Responsibilities
//! - Model the two dispatch kinds: terminal handlers and routers
//! - Advance the request depth by exactly one per router
//! - Drive a request through routers until a handler answers
//!
//! # Design Decisions
//! - Closed enum, so callers never inspect kinds at runtime
//! - Dispatchables are built per request step and consumed when served
//! - Routers resolve iteratively; only swaps nest a second dispatch loop
//!
//! For a request to `/users/{user-id}/orders` the first router only sees
//! `users`. If it returns another router, that one only sees `{user-id}`,
//! and a third would only see `orders`.

use std::fmt;

use axum::response::Response;
use futures_util::future::BoxFuture;

use crate::http::request::Request;
use crate::routing::path::shift_path;

type HandlerFn = Box<dyn FnOnce(Request) -> BoxFuture<'static, Response> + Send>;
type RouterFn = Box<dyn FnOnce(&str) -> Dispatchable + Send>;

/// Either a terminal handler or a router that consumes one path segment.
pub enum Dispatchable {
    Handler(Handler),
    Router(Router),
}

/// Terminal step: runs business logic bound to an environment.
pub struct Handler {
    serve: HandlerFn,
}

/// Intermediate step: picks the next dispatchable from one path segment.
pub struct Router {
    select: RouterFn,
}

impl Handler {
    pub(crate) fn new<F>(serve: F) -> Self
    where
        F: FnOnce(Request) -> BoxFuture<'static, Response> + Send + 'static,
    {
        Self {
            serve: Box::new(serve),
        }
    }

    /// Run the handler. Failures are already rendered by the bound
    /// environment's error handler.
    pub async fn serve(self, req: Request) -> Response {
        (self.serve)(req).await
    }
}

impl Router {
    pub(crate) fn new<F>(select: F) -> Self
    where
        F: FnOnce(&str) -> Dispatchable + Send + 'static,
    {
        Self {
            select: Box::new(select),
        }
    }

    /// One dispatch step: read the segment at the current depth, select the
    /// next dispatchable, and return it with the request one level deeper.
    /// Depth saturates instead of wrapping, so it never decreases.
    pub fn next(self, req: Request) -> (Dispatchable, Request) {
        let depth = req.depth();
        let (head, _) = shift_path(req.path(), depth);
        tracing::trace!(depth, head = %head, path = %req.path(), "Routing segment");

        let next = (self.select)(head.as_str());
        (next, req.with_depth(depth.saturating_add(1)))
    }
}

impl Dispatchable {
    /// Serve the request, following routers until a handler responds.
    pub async fn serve(self, req: Request) -> Response {
        let mut current = self;
        let mut req = req;
        loop {
            match current {
                Dispatchable::Handler(handler) => return handler.serve(req).await,
                Dispatchable::Router(router) => {
                    let (next, deeper) = router.next(req);
                    current = next;
                    req = deeper;
                }
            }
        }
    }
}

impl fmt::Debug for Dispatchable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatchable::Handler(_) => f.write_str("Dispatchable::Handler"),
            Dispatchable::Router(_) => f.write_str("Dispatchable::Router"),
        }
    }
}

impl From<Handler> for Dispatchable {
    fn from(handler: Handler) -> Self {
        Dispatchable::Handler(handler)
    }
}

impl From<Router> for Dispatchable {
    fn from(router: Router) -> Self {
        Dispatchable::Router(router)
    }
}
