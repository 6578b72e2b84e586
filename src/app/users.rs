//! User sub-resources behind the auth swap.

use axum::http::StatusCode;

use crate::app::{reply, Requester};
use crate::env::Environment;
use crate::error::StatusError;
use crate::routing::Dispatchable;

const USER_RESOURCES: &[&str] = &[
    "avatar",
    "status",
    "bookmarks",
    "friends",
    "password",
    "ratings",
    "session",
    "email-verification",
];

/// Router for the segment after `/users`.
pub fn users(env: &Environment<Requester>, head: &str) -> Dispatchable {
    if head.is_empty() {
        return reply(env, "Users");
    }
    env.router(user(head.to_string()))
}

/// Router for the segment after `/users/{username}`.
pub fn user(username: String) -> impl FnOnce(&Environment<Requester>, &str) -> Dispatchable + Send {
    move |env, head| match head {
        "" => reply(env, format!("User: {}", username)),
        "error" => env.fail(
            StatusError::new(StatusCode::INTERNAL_SERVER_ERROR, "this was an intended error")
                .with_message(format!("Something went wrong {} =(", username)),
        ),
        resource if USER_RESOURCES.contains(&resource) => {
            reply(env, format!("{} for {}", resource, username))
        }
        _ => env.fail(StatusError::not_found()),
    }
}
