//! mysql-agent - member identity and DR replication health for MySQL clusters
//!
//! - `cluster`: who this member is and how peers reach it, in overlay or
//!   host network mode
//! - `dr_replication`: latest DR replication status and its health check
//! - `health`: named liveness and readiness checks
//! - `http_server`: health endpoints for the kubelet
//! - `observability`: structured JSON logging
//! - `cli`: command-line entry points

pub mod cli;
pub mod cluster;
pub mod dr_replication;
pub mod health;
pub mod http_server;
pub mod observability;
