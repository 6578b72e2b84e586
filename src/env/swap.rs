//! Conditional environment swaps.
//!
//! A swap guards the rest of the chain behind a condition, typically
//! authentication. The condition either produces the environment the rest of
//! the chain runs in, or fails. A failure is always reported through the
//! environment the swap was built on, never through one the condition was
//! constructing. Swaps stack: each layer reports against its own input.

use axum::response::Response;
use std::future::Future;

use crate::env::Environment;
use crate::error::Error;
use crate::http::request::Request;
use crate::routing::dispatch::Dispatchable;

/// Run `condition` and, on success, serve the request with the dispatchable
/// `next` builds from the new environment. Depth is not advanced.
pub fn swap<T, U, C, P>(env: &Environment<T>, condition: C, next: P) -> Dispatchable
where
    T: Send + Sync + 'static,
    U: Send + Sync + 'static,
    C: FnOnce(&Environment<T>, &Request) -> Result<Environment<U>, Error> + Send + 'static,
    P: FnOnce(Environment<U>) -> Dispatchable + Send + 'static,
{
    env.handler(move |env, req| async move {
        let swapped = condition(&env, &req)?;
        Ok::<_, Error>(next(swapped).serve(req).await)
    })
}

/// Swap, then run a business function as the terminal handler.
pub fn swap_handler<T, U, C, F, Fut>(env: &Environment<T>, condition: C, f: F) -> Dispatchable
where
    T: Send + Sync + 'static,
    U: Send + Sync + 'static,
    C: FnOnce(&Environment<T>, &Request) -> Result<Environment<U>, Error> + Send + 'static,
    F: FnOnce(Environment<U>, Request) -> Fut + Send + 'static,
    Fut: Future<Output = Result<Response, Error>> + Send + 'static,
{
    swap(env, condition, move |env: Environment<U>| env.handler(f))
}

/// Swap, then route the current segment with `f`.
pub fn swap_router<T, U, C, F>(env: &Environment<T>, condition: C, f: F) -> Dispatchable
where
    T: Send + Sync + 'static,
    U: Send + Sync + 'static,
    C: FnOnce(&Environment<T>, &Request) -> Result<Environment<U>, Error> + Send + 'static,
    F: FnOnce(&Environment<U>, &str) -> Dispatchable + Send + 'static,
{
    swap(env, condition, move |env: Environment<U>| env.router(f))
}
