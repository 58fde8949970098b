//! CLI module for the agent
//!
//! Provides command-line interface for:
//! - whoami: Resolve and print the local member identity
//! - seed: Resolve a peer from its group seed
//! - whitelist: Print the group replication whitelist
//! - serve: Serve the health endpoints

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{build_health_handler, run, run_command, seed, serve, whitelist, whoami};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
