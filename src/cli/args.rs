//! CLI argument definitions using clap
//!
//! Commands:
//! - mysql-agent whoami
//! - mysql-agent seed <host:port>
//! - mysql-agent whitelist
//! - mysql-agent serve [--host <host>] [--port <port>]

use clap::{Parser, Subcommand};

/// Member identity and DR replication health agent for MySQL clusters
#[derive(Parser, Debug)]
#[command(name = "mysql-agent")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the local member's identity
    Whoami,

    /// Resolve a peer's identity from its group seed
    Seed {
        /// Group seed, `<host>:<port>`
        seed: String,
    },

    /// Print the group replication whitelist for the local member
    Whitelist,

    /// Serve the health endpoints
    Serve {
        /// Address to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind to
        #[arg(long, default_value_t = 10512)]
        port: u16,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed() {
        let cli = Cli::try_parse_from(["mysql-agent", "seed", "mysql-1.mysql:33061"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Seed {
                seed: "mysql-1.mysql:33061".to_string()
            }
        );
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["mysql-agent", "serve"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Serve {
                host: "0.0.0.0".to_string(),
                port: 10512
            }
        );
    }

    #[test]
    fn test_seed_requires_argument() {
        assert!(Cli::try_parse_from(["mysql-agent", "seed"]).is_err());
    }
}
