//! CLI command implementations
//!
//! Commands read the cluster environment once, resolve what they need and
//! write a single JSON object to stdout. Only `serve` keeps running.

use std::sync::Arc;

use serde_json::json;

use crate::cluster::{ClusterEnv, MemberIdentity, SystemHostname};
use crate::dr_replication::{
    self, dr_health_check_from_env, ReplicationStatusStore, DR_CHECK_NAME,
};
use crate::health::HealthHandler;
use crate::http_server::{HealthState, HttpServer, HttpServerConfig};
use crate::observability::{log_event, Event, Logger};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Whoami => whoami(),
        Command::Seed { seed: s } => seed(&s),
        Command::Whitelist => whitelist(),
        Command::Serve { host, port } => serve(HttpServerConfig { host, port }),
    }
}

fn resolve_local(env: &ClusterEnv) -> CliResult<MemberIdentity> {
    MemberIdentity::local(env, &SystemHostname).map_err(|e| {
        Logger::fatal(
            Event::IdentityFailed,
            &[("code", e.code()), ("error", &e.to_string())],
        );
        CliError::from(e)
    })
}

/// Print the local member's identity
pub fn whoami() -> CliResult<()> {
    let env = ClusterEnv::from_process()?;
    let member = resolve_local(&env)?;
    write_response(&member.summary())
}

/// Resolve a peer from its group seed and print its identity
pub fn seed(seed: &str) -> CliResult<()> {
    let env = ClusterEnv::from_process()?;
    let peer = MemberIdentity::from_seed(&env, seed)?;
    write_response(&peer.summary())
}

/// Print the group replication whitelist for the local member
pub fn whitelist() -> CliResult<()> {
    let env = ClusterEnv::from_process()?;
    let member = resolve_local(&env)?;
    let cidr = member.whitelist_cidr()?;
    write_response(&json!({ "whitelist_cidr": cidr }))
}

/// Build the health checks for this member.
///
/// The DR check is registered as a readiness check only when a DR peer is
/// configured; otherwise the agent runs without it.
pub fn build_health_handler(env: &ClusterEnv, store: Arc<ReplicationStatusStore>) -> HealthHandler {
    let handler = HealthHandler::new();
    match dr_health_check_from_env(env, store) {
        Ok(check) => {
            handler.add_readiness_check(DR_CHECK_NAME, check);
            Logger::info(Event::DrCheckRegistered, &[("check", DR_CHECK_NAME)]);
        }
        Err(e) => {
            Logger::info(Event::DrCheckDisabled, &[("reason", &e.to_string())]);
        }
    }
    handler
}

/// Resolve the local member and serve the health endpoints.
pub fn serve(config: HttpServerConfig) -> CliResult<()> {
    log_event(Event::AgentStart);

    let env = ClusterEnv::from_process()?;
    let member = resolve_local(&env)?;
    Logger::info(
        Event::IdentityResolved,
        &[
            ("cluster", member.cluster_name()),
            ("mode", member.network_mode().as_str()),
            ("name", &member.name()),
            ("namespace", member.namespace()),
        ],
    );

    let store = dr_replication::global();
    let checks = build_health_handler(&env, Arc::clone(&store));
    let state = HealthState::new(Arc::new(checks), store).with_identity(member.summary());
    let server = HttpServer::new(config, state);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    let result = rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    });

    if let Err(e) = &result {
        Logger::fatal(Event::HealthServerFailed, &[("error", e.message())]);
    }
    log_event(Event::AgentStop);
    result
}
