//! Demo application plugged into the router.
//!
//! # Data Flow
//! ```text
//! /                    → site name
//! /accounts            → placeholder
//! /restaurants         → placeholder
//! /tables              → placeholder
//! /users/...           → auth swap → users.rs
//! anything else        → 404
//! ```
//!
//! Nothing here persists data or performs real authentication.

pub mod auth;
pub mod users;

use crate::env::{swap_router, Environment};
use crate::error::StatusError;
use crate::http::response::ok;
use crate::routing::Dispatchable;

pub use auth::{requester_auth, Requester, ADMIN_USERNAME};

/// Root environment value.
#[derive(Debug, Clone)]
pub struct DataSource {
    pub site_name: String,
}

/// Root router.
pub fn index(env: &Environment<DataSource>, head: &str) -> Dispatchable {
    match head {
        "" => env.handler(|env, _| async move { Ok(ok(env.value().site_name.clone())) }),
        "favicon.ico" => env.fail(StatusError::not_found()),
        "accounts" => reply(env, "Accounts"),
        "restaurants" => reply(env, "Restaurants"),
        "tables" => reply(env, "Tables"),
        "users" => swap_router(env, requester_auth, users::users),
        _ => env.fail(StatusError::not_found()),
    }
}

/// Handler answering 200 with a fixed body.
pub(crate) fn reply<T>(env: &Environment<T>, body: impl Into<String>) -> Dispatchable
where
    T: Send + Sync + 'static,
{
    let body = body.into();
    env.handler(move |_, _| async move { Ok(ok(body)) })
}
