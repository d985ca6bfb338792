use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::task::JoinSet;
use tokio::time;
use tracing::{debug, error, info, warn};

use crate::protocol::{RequestDispatcher, handle_connection};

/// How long open connections get to finish once shutdown starts.
pub const DEFAULT_SHUTDOWN_GRACE: Duration =
    Duration::from_secs(crate::config::DEFAULT_SHUTDOWN_GRACE_SECONDS);

/// TCP front end: one task per accepted connection.
pub struct BoggleServer {
    listener: TcpListener,
    dispatcher: Arc<RequestDispatcher>,
    max_body_bytes: usize,
    shutdown_grace: Duration,
}

impl BoggleServer {
    pub async fn bind(
        address: &str,
        dispatcher: Arc<RequestDispatcher>,
        max_body_bytes: usize,
    ) -> io::Result<Self> {
        let listener = TcpListener::bind(address).await?;
        Ok(Self {
            listener,
            dispatcher,
            max_body_bytes,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        })
    }

    pub fn with_shutdown_grace(mut self, shutdown_grace: Duration) -> Self {
        self.shutdown_grace = shutdown_grace;
        self
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until `shutdown` resolves, then give the
    /// connections already accepted the grace period to finish. Any still
    /// open after that are aborted.
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut connections = JoinSet::new();

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("No longer accepting connections");
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        debug!("Accepted connection from {}", peer);
                        let dispatcher = self.dispatcher.clone();
                        let max_body_bytes = self.max_body_bytes;
                        connections.spawn(async move {
                            handle_connection(stream, &dispatcher, max_body_bytes).await;
                            debug!("Closed connection from {}", peer);
                        });
                    }
                    Err(e) => warn!("Failed to accept connection: {}", e),
                },
                Some(finished) = connections.join_next(), if !connections.is_empty() => {
                    if let Err(e) = finished {
                        error!("Connection task failed: {}", e);
                    }
                }
            }
        }

        if connections.is_empty() {
            return;
        }

        info!(
            "Waiting up to {:?} for {} open connections",
            self.shutdown_grace,
            connections.len()
        );
        let drain = async {
            while let Some(finished) = connections.join_next().await {
                if let Err(e) = finished {
                    error!("Connection task failed: {}", e);
                }
            }
        };
        if time::timeout(self.shutdown_grace, drain).await.is_err() {
            warn!(
                "Dropping {} connections still open after {:?}",
                connections.len(),
                self.shutdown_grace
            );
            connections.shutdown().await;
        }
    }
}

/// Resolves on SIGINT or SIGTERM (Ctrl+C elsewhere).
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match (
            signal(SignalKind::interrupt()),
            signal(SignalKind::terminate()),
        ) {
            (Ok(mut sigint), Ok(mut sigterm)) => {
                tokio::select! {
                    _ = sigint.recv() => {
                        info!("Received SIGINT, shutting down gracefully...");
                    }
                    _ = sigterm.recv() => {
                        info!("Received SIGTERM, shutting down gracefully...");
                    }
                }
            }
            _ => {
                warn!("Failed to install signal handlers, falling back to Ctrl+C");
                wait_for_ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    wait_for_ctrl_c().await;
}

async fn wait_for_ctrl_c() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down gracefully..."),
        Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
    }
}
