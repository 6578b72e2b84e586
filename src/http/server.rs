//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with a single fallback feeding the dispatch engine
//! - Wire up middleware (request ID, tracing, timeout)
//! - Buffer the body and seed routing depth at ingress
//! - Build a fresh root dispatchable per request
//! - Serve with graceful shutdown

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RouterConfig;
use crate::http::request::{MakeRequestUuidV4, Request, X_REQUEST_ID};
use crate::http::response::text;
use crate::routing::{take_depth_header, Dispatchable};

/// Builds the root dispatchable for one request.
pub type RootFactory = Arc<dyn Fn() -> Dispatchable + Send + Sync>;

/// Application state injected into the dispatch handler.
#[derive(Clone)]
struct AppState {
    root: RootFactory,
    accept_depth_header: bool,
    depth_header: Arc<str>,
    max_body_bytes: usize,
}

/// HTTP server in front of a root router.
pub struct HttpServer {
    router: Router,
    config: RouterConfig,
}

impl HttpServer {
    /// Create a new HTTP server. `root` is called once per request.
    pub fn new<F>(config: RouterConfig, root: F) -> Self
    where
        F: Fn() -> Dispatchable + Send + Sync + 'static,
    {
        let state = AppState {
            root: Arc::new(root),
            accept_depth_header: config.routing.accept_depth_header,
            depth_header: Arc::from(config.routing.depth_header.as_str()),
            max_body_bytes: config.limits.max_body_bytes,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RouterConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http().make_span_with(
                        |req: &axum::extract::Request| {
                            let request_id = req
                                .headers()
                                .get(X_REQUEST_ID)
                                .and_then(|v| v.to_str().ok())
                                .unwrap_or("-");
                            tracing::info_span!(
                                "request",
                                method = %req.method(),
                                path = %req.uri().path(),
                                request_id = %request_id,
                            )
                        },
                    ))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
            )
    }

    /// The fully layered Axum router, for in-process serving.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` resolves, then drain in-flight requests.
    pub async fn run<S>(self, listener: TcpListener, shutdown: S) -> Result<(), std::io::Error>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

/// Ingress: buffer the request, seed its depth and hand it to the root.
async fn dispatch_handler(State(state): State<AppState>, request: axum::extract::Request) -> Response {
    let (mut parts, body) = request.into_parts();
    let seeded = take_depth_header(&mut parts.headers, &state.depth_header);

    let body = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(
                path = %parts.uri.path(),
                limit = state.max_body_bytes,
                error = %e,
                "Rejected request body"
            );
            return text(StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large");
        }
    };

    let mut req = Request::from_http(axum::http::Request::from_parts(parts, body));
    if state.accept_depth_header {
        if let Some(depth) = seeded {
            tracing::debug!(depth, "Seeded routing depth from header");
            req = req.with_depth(depth);
        }
    }

    (state.root)().serve(req).await
}
