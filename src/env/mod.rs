//! Request-scoped execution environment.
//!
//! # Data Flow
//! ```text
//! Root Environment<T> (built once at startup)
//!     → env.router(..) / env.handler(..) bind it to dispatchables
//!     → swap.rs may derive Environment<U> for the rest of the chain
//!     → handler failures go to the bound environment's error handler
//! ```
//!
//! # Design Decisions
//! - Environments are immutable; deriving always produces a new one
//! - The value type is a generic parameter, never a runtime cast
//! - The error handler is fixed at root construction and survives derivation

pub mod swap;

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::response::Response;
use futures_util::FutureExt;

use crate::error::{self, Error};
use crate::http::request::Request;
use crate::routing::dispatch::{Dispatchable, Handler, Router};

pub use swap::{swap, swap_handler, swap_router};

/// Renders a failure into a response.
pub type ErrorHandler = Arc<dyn Fn(&Error, &Request) -> Response + Send + Sync>;

/// Application value plus the strategy used to report failures.
pub struct Environment<T> {
    value: Arc<T>,
    error_handler: ErrorHandler,
}

impl<T> Clone for Environment<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            error_handler: Arc::clone(&self.error_handler),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Environment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<T> Environment<T> {
    /// Root environment using the default error translator.
    pub fn new(value: T) -> Self {
        Self::with_error_handler(value, error::translate)
    }

    /// Root environment with a custom error handler.
    pub fn with_error_handler<H>(value: T, handler: H) -> Self
    where
        H: Fn(&Error, &Request) -> Response + Send + Sync + 'static,
    {
        Self {
            value: Arc::new(value),
            error_handler: Arc::new(handler),
        }
    }

    /// New environment holding `value` and this environment's error handler.
    pub fn derive<U>(&self, value: U) -> Environment<U> {
        Environment {
            value: Arc::new(value),
            error_handler: Arc::clone(&self.error_handler),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Shared handle to the value, for carrying it into a derived value.
    pub fn shared_value(&self) -> Arc<T> {
        Arc::clone(&self.value)
    }

    pub fn error_handler(&self) -> &ErrorHandler {
        &self.error_handler
    }

    pub fn handle_error(&self, err: &Error, req: &Request) -> Response {
        (self.error_handler)(err, req)
    }
}

impl<T: Send + Sync + 'static> Environment<T> {
    /// Bind a business function as a terminal handler.
    ///
    /// A returned failure is rendered by this environment's error handler.
    /// On success the returned response is sent as is.
    pub fn handler<F, Fut>(&self, f: F) -> Dispatchable
    where
        F: FnOnce(Environment<T>, Request) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Response, Error>> + Send + 'static,
    {
        let env = self.clone();
        Dispatchable::Handler(Handler::new(move |req: Request| {
            async move {
                match f(env.clone(), req.clone()).await {
                    Ok(response) => response,
                    Err(err) => env.handle_error(&err, &req),
                }
            }
            .boxed()
        }))
    }

    /// Bind a segment-selection function as a router.
    pub fn router<F>(&self, f: F) -> Dispatchable
    where
        F: FnOnce(&Environment<T>, &str) -> Dispatchable + Send + 'static,
    {
        let env = self.clone();
        Dispatchable::Router(Router::new(move |head: &str| f(&env, head)))
    }

    /// Handler that reports `err` without running any business logic.
    pub fn fail(&self, err: impl Into<Error>) -> Dispatchable {
        let err = err.into();
        self.handler(move |_, _| async move { Err(err) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatusError;
    use crate::http::response::{ok, text};
    use axum::body::Bytes;
    use axum::http::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn request(uri: &str) -> Request {
        Request::from_http(axum::http::Request::builder().uri(uri).body(Bytes::new()).unwrap())
    }

    async fn body(res: Response) -> String {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[derive(Debug, PartialEq)]
    struct Site {
        name: &'static str,
    }

    #[test]
    fn test_derive_leaves_source_untouched() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let root = Environment::with_error_handler(Site { name: "root" }, move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            text(StatusCode::IM_A_TEAPOT, "")
        });

        let derived: Vec<Environment<u32>> = (0..5).map(|i| root.derive(i)).collect();

        assert_eq!(root.value(), &Site { name: "root" });
        for (i, env) in derived.iter().enumerate() {
            assert_eq!(*env.value(), i as u32);
            assert!(Arc::ptr_eq(env.error_handler(), root.error_handler()));
        }

        let err = Error::from(StatusError::not_found());
        root.handle_error(&err, &request("/"));
        derived[3].handle_error(&err, &request("/"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_default_error_handler_installed() {
        let env = Environment::new(());
        let res = env.handle_error(&StatusError::unauthorized().into(), &request("/x"));
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body(res).await, "Unauthorized");
    }

    #[tokio::test]
    async fn test_handler_success_passes_response_through() {
        let env = Environment::new(Site { name: "demo" });
        let handler = env.handler(|env, _| async move { Ok(ok(env.value().name)) });
        let res = handler.serve(request("/")).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body(res).await, "demo");
    }

    #[tokio::test]
    async fn test_handler_failure_goes_to_bound_error_handler() {
        let env = Environment::with_error_handler((), |err, req| {
            text(StatusCode::BAD_REQUEST, format!("{} at {}", err, req.path()))
        });
        let handler = env.handler(|_, _| async { Err(StatusError::not_found().into()) });
        let res = handler.serve(request("/missing/page")).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body(res).await, "Not Found at /missing/page");
    }

    #[tokio::test]
    async fn test_fail_reports_error() {
        let env = Environment::new(());
        let res = env.fail(StatusError::not_found()).serve(request("/nope")).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(res).await, "Not Found");
    }
}
