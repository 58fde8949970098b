//! # Health Server
//!
//! Serves the health routes over HTTP for the kubelet's probes.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use super::config::HttpServerConfig;
use super::health_routes::{health_routes, HealthState};
use crate::observability::{Event, Logger};

/// HTTP server for the agent's health endpoints
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server for the given state
    pub fn new(config: HttpServerConfig, state: HealthState) -> Self {
        let router = health_routes(Arc::new(state));
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the listener fails.
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid listen address {:?}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        Logger::info(Event::HealthServerStart, &[("addr", &addr.to_string())]);
        axum::serve(listener, self.router).await
    }
}
