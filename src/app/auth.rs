//! Stub authentication condition.

use std::sync::Arc;

use uuid::Uuid;

use crate::app::DataSource;
use crate::env::Environment;
use crate::error::{Error, StatusError};
use crate::http::request::Request;

/// The only username the stub accepts.
pub const ADMIN_USERNAME: &str = "admin";

/// Caller identity carried by environments past the auth swap.
#[derive(Debug, Clone)]
pub struct Requester {
    pub id: String,
    pub username: String,
    pub token: Uuid,
    pub data: Arc<DataSource>,
}

/// Swap condition: accept callers whose `username` form field is `admin`.
pub fn requester_auth(
    env: &Environment<DataSource>,
    req: &Request,
) -> Result<Environment<Requester>, Error> {
    let username = req.form_value("username").unwrap_or_default();
    if username != ADMIN_USERNAME {
        tracing::debug!(username = %username, "Rejected requester");
        return Err(StatusError::unauthorized().into());
    }

    let requester = Requester {
        id: req
            .remote_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        username,
        token: Uuid::new_v4(),
        data: env.shared_value(),
    };

    Ok(env.derive(requester))
}
