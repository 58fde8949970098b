//! Local hostname lookup

use std::fs;

use super::errors::{IdentityError, IdentityResult};

const KERNEL_HOSTNAME_PATH: &str = "/proc/sys/kernel/hostname";
const ENV_HOSTNAME: &str = "HOSTNAME";

/// Source of the local host's name.
pub trait HostnameSource {
    fn hostname(&self) -> IdentityResult<String>;
}

/// Reads the kernel hostname, falling back to the `HOSTNAME` variable.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHostname;

impl HostnameSource for SystemHostname {
    fn hostname(&self) -> IdentityResult<String> {
        let from_kernel = fs::read_to_string(KERNEL_HOSTNAME_PATH)
            .map(|raw| raw.trim().to_string())
            .map_err(|e| format!("reading {KERNEL_HOSTNAME_PATH}: {e}"));

        let env_hostname = || std::env::var(ENV_HOSTNAME).ok();
        match from_kernel {
            Ok(name) if !name.is_empty() => Ok(name),
            Ok(_) => fallback(format!("{KERNEL_HOSTNAME_PATH} is empty"), env_hostname()),
            Err(reason) => fallback(reason, env_hostname()),
        }
    }
}

fn fallback(reason: String, env_hostname: Option<String>) -> IdentityResult<String> {
    env_hostname
        .filter(|name| !name.is_empty())
        .ok_or_else(|| IdentityError::Hostname(format!("{reason}; {ENV_HOSTNAME} not set")))
}

/// A fixed hostname, for tools that already know it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticHostname(pub String);

impl HostnameSource for StaticHostname {
    fn hostname(&self) -> IdentityResult<String> {
        if self.0.is_empty() {
            return Err(IdentityError::Hostname("hostname is empty".to_string()));
        }
        Ok(self.0.clone())
    }
}
