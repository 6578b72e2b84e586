//! Failure taxonomy and its translation into HTTP responses.
//!
//! # Responsibilities
//! - Carry classified failures (status + internal message + user message)
//! - Wrap every other error shape as an unclassified failure
//! - Render failures for the client without leaking internal detail
//!
//! # Design Decisions
//! - Classification is total: every `Error` is either `Known` or `Unknown`
//! - Internal messages are logged, user messages are sent, never the reverse
//! - Unclassified failures always degrade to a generic 500

use axum::http::StatusCode;
use axum::response::Response;

use crate::http::request::Request;
use crate::http::response::text;

/// Boxed error type for unclassified failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Body sent for every unclassified failure.
pub const GENERIC_ERROR_BODY: &str = "Internal Server Error";

/// A failure that knows which HTTP status it maps to.
///
/// The internal message is meant for logs. The user message is what the
/// client sees; when it is empty the internal message is shown instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{internal}")]
pub struct StatusError {
    status: StatusCode,
    internal: String,
    message: String,
}

impl StatusError {
    pub fn new(status: StatusCode, internal: impl Into<String>) -> Self {
        Self {
            status,
            internal: internal.into(),
            message: String::new(),
        }
    }

    /// Replace the message shown to the client.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// 401 carrying the canonical reason phrase as both messages.
    pub fn unauthorized() -> Self {
        Self::from_status(StatusCode::UNAUTHORIZED)
    }

    /// 404 carrying the canonical reason phrase as both messages.
    pub fn not_found() -> Self {
        Self::from_status(StatusCode::NOT_FOUND)
    }

    fn from_status(status: StatusCode) -> Self {
        Self::new(status, status.canonical_reason().unwrap_or_default())
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn internal(&self) -> &str {
        &self.internal
    }

    /// Message intended for the HTTP response.
    pub fn message(&self) -> &str {
        if self.message.is_empty() {
            &self.internal
        } else {
            &self.message
        }
    }
}

/// Failure returned by handlers and swap conditions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Status(#[from] StatusError),

    #[error(transparent)]
    Other(#[from] BoxError),
}

impl Error {
    /// Wrap any error as an unclassified failure.
    pub fn other<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::Other(err.into())
    }
}

/// Result of classifying a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification<'a> {
    Known {
        status: StatusCode,
        internal: &'a str,
        message: &'a str,
    },
    Unknown,
}

pub fn classify(err: &Error) -> Classification<'_> {
    match err {
        Error::Status(e) => Classification::Known {
            status: e.status(),
            internal: e.internal(),
            message: e.message(),
        },
        Error::Other(_) => Classification::Unknown,
    }
}

/// Default error handler installed on every environment that does not
/// supply its own.
pub fn translate(err: &Error, req: &Request) -> Response {
    match classify(err) {
        Classification::Known {
            status,
            internal,
            message,
        } => {
            tracing::warn!(
                status = status.as_u16(),
                internal = %internal,
                path = %req.path(),
                request_id = req.request_id().unwrap_or("-"),
                "Request failed"
            );
            text(status, message.to_owned())
        }
        Classification::Unknown => {
            tracing::error!(
                error = %err,
                path = %req.path(),
                request_id = req.request_id().unwrap_or("-"),
                "Unclassified request failure"
            );
            text(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR_BODY)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_defaults_to_internal() {
        let err = StatusError::new(StatusCode::BAD_GATEWAY, "upstream gone");
        assert_eq!(err.message(), "upstream gone");

        let err = err.with_message("try again later");
        assert_eq!(err.message(), "try again later");
        assert_eq!(err.internal(), "upstream gone");

        let err = err.with_message("");
        assert_eq!(err.message(), "upstream gone");
    }

    #[test]
    fn test_canonical_constructors() {
        let err = StatusError::unauthorized();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "Unauthorized");

        let err = StatusError::not_found();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Not Found");
    }

    #[test]
    fn test_classify_is_total() {
        let known: Error = StatusError::new(StatusCode::CONFLICT, "dup").into();
        assert_eq!(
            classify(&known),
            Classification::Known {
                status: StatusCode::CONFLICT,
                internal: "dup",
                message: "dup",
            }
        );

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        assert_eq!(classify(&Error::other(io)), Classification::Unknown);
        assert_eq!(classify(&Error::other("plain string")), Classification::Unknown);
    }

    #[test]
    fn test_status_error_display_is_internal() {
        let err = StatusError::new(StatusCode::FORBIDDEN, "token expired").with_message("nope");
        assert_eq!(err.to_string(), "token expired");
        assert_eq!(Error::from(err).to_string(), "token expired");
    }
}
