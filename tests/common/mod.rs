//! Shared utilities for integration tests.

use std::io::Write;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use segment_router::app::{self, DataSource};
use segment_router::{Environment, HttpServer, RouterConfig, Shutdown};
use tokio::net::TcpListener;
use tracing_subscriber::fmt::MakeWriter;

/// Demo app server on an ephemeral port. Dropping the returned `Shutdown`
/// after triggering stops it.
#[allow(dead_code)]
pub async fn start_demo_server(config: RouterConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let env = Environment::new(DataSource {
        site_name: config.app.site_name.clone(),
    });
    let server = HttpServer::new(config, move || env.router(app::index));

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.signalled();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// In-memory log sink for asserting on emitted tracing events.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

#[allow(dead_code)]
impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8(self.buf.lock().unwrap().clone()).unwrap()
    }

    /// Subscriber writing plain text into this capture.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish()
    }
}

impl Write for LogCapture {
    fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
