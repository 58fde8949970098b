//! # Health HTTP Server
//!
//! Exposes the agent's health checks over HTTP.
//!
//! # Endpoints
//!
//! - `/live` - Liveness
//! - `/ready` - Readiness (includes DR replication when configured)
//! - `/identity` - Local member identity
//! - `/dr/status` - Latest DR replication status

pub mod config;
pub mod health_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use health_routes::{health_routes, HealthState};
pub use server::HttpServer;
