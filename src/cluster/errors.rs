//! Member Identity Error Types
//!
//! Every construction-time failure is returned to the caller with the
//! failing input named. Credentials never appear in any message.

use thiserror::Error;

/// Result type for identity resolution
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Identity resolution errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("environment variable {var} is not a valid boolean: {value:?}")]
    MalformedBool { var: &'static str, value: String },

    #[error("resolving local hostname: {0}")]
    Hostname(String),

    #[error("use host-network, but pod name not set")]
    MissingPodName,

    #[error("getting pod name from group seed {seed:?}: {reason}")]
    MalformedSeed { seed: String, reason: &'static str },

    #[error("pod IP {ip:?} is not a private IPv4 address")]
    NotPrivate { ip: String },

    #[error("invalid ordinal in host-network for host {host:?}")]
    OrdinalUnavailable { host: String },
}

impl IdentityError {
    /// Stable code for the error kind, used in CLI output and logs.
    pub fn code(&self) -> &'static str {
        match self {
            IdentityError::MalformedBool { .. } => "MALFORMED_BOOL",
            IdentityError::Hostname(_) => "HOSTNAME",
            IdentityError::MissingPodName => "MISSING_POD_NAME",
            IdentityError::MalformedSeed { .. } => "MALFORMED_SEED",
            IdentityError::NotPrivate { .. } => "NOT_PRIVATE",
            IdentityError::OrdinalUnavailable { .. } => "ORDINAL_UNAVAILABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_private_names_ip() {
        let err = IdentityError::NotPrivate {
            ip: "8.8.8.8".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "pod IP \"8.8.8.8\" is not a private IPv4 address"
        );
        assert_eq!(err.code(), "NOT_PRIVATE");
    }

    #[test]
    fn test_malformed_bool_names_variable() {
        let err = IdentityError::MalformedBool {
            var: "MYSQL_CLUSTER_MULTI_MASTER",
            value: "maybe".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("MYSQL_CLUSTER_MULTI_MASTER"));
        assert!(msg.contains("maybe"));
    }
}
