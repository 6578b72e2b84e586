//! Shutdown coordination for the server.

use std::future::Future;

use tokio::sync::watch;

/// Coordinator for graceful shutdown.
///
/// One trigger reaches every listener, including listeners created after
/// the trigger fired.
pub struct Shutdown {
    fired: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (fired, _) = watch::channel(false);
        Self { fired }
    }

    /// Future resolving once shutdown has been triggered, or once the
    /// coordinator is dropped.
    pub fn signalled(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.fired.subscribe();
        async move {
            loop {
                if *rx.borrow_and_update() {
                    return;
                }
                if rx.changed().await.is_err() {
                    return;
                }
            }
        }
    }

    pub fn trigger(&self) {
        self.fired.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.fired.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_resolves_pending_listeners() {
        let shutdown = Shutdown::new();
        let a = shutdown.signalled();
        let b = shutdown.signalled();
        assert!(!shutdown.is_triggered());

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), async {
            a.await;
            b.await;
        })
        .await
        .unwrap();
        assert!(shutdown.is_triggered());
    }

    #[tokio::test]
    async fn test_late_listener_still_sees_trigger() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), shutdown.signalled())
            .await
            .unwrap();
    }
}
