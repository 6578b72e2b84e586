//! Segment Router (v1)
//!
//! Serves the demo application on top of the segment router.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ───────────────▶ http server ──▶ ingress (body, depth header)
//!                                           │
//!                                           ▼
//!                                 root Router (Environment<DataSource>)
//!                                           │ one segment per router
//!                                           ▼
//!                                 swap (auth) ──fail──▶ pre-swap error handler
//!                                           │ ok
//!                                           ▼
//!                                 Router(s) (Environment<Requester>)
//!                                           │
//!                                           ▼
//!     Client Response ◀──────────── Handler ──fail──▶ bound error handler
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use segment_router::app::{self, DataSource};
use segment_router::config::{load_config, RouterConfig};
use segment_router::lifecycle::{signals::shutdown_signal, Shutdown};
use segment_router::observability::logging;
use segment_router::{Environment, HttpServer};

#[derive(Parser)]
#[command(name = "segment-router")]
#[command(about = "Segment-at-a-time HTTP router demo server", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability)?;

    tracing::info!("segment-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        accept_depth_header = config.routing.accept_depth_header,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let env = Environment::new(DataSource {
        site_name: config.app.site_name.clone(),
    });
    let server = HttpServer::new(config, move || env.router(app::index));

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.signalled();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
