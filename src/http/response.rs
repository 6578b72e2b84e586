//! Response construction helpers.
//!
//! # Responsibilities
//! - Build plain-text responses for handlers and the error translator
//! - Stamp content type and sniffing protection consistently
//!
//! # Design Decisions
//! - Routers never build responses; only handlers and error handlers do
//! - Bodies are sent verbatim with no trailing newline

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Plain-text response with the given status.
pub fn text(status: StatusCode, body: impl Into<String>) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN)),
            (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        ],
        body.into(),
    )
        .into_response()
}

/// 200 OK plain-text response.
pub fn ok(body: impl Into<String>) -> Response {
    text(StatusCode::OK, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_text_response() {
        let res = text(StatusCode::IM_A_TEAPOT, "short and stout");
        assert_eq!(res.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(res.headers()[header::CONTENT_TYPE], TEXT_PLAIN);
        assert_eq!(res.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");

        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"short and stout");
    }
}
