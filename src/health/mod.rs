//! Health checks
//!
//! Named zero-argument checks grouped into liveness and readiness. A
//! readiness evaluation runs the liveness checks too, so a process that is
//! not alive is never ready.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// Failure reported by a check
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CheckError(String);

impl CheckError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Result of one check invocation
pub type CheckResult = Result<(), CheckError>;

/// A health check. Must return promptly and must not block.
pub type Check = Arc<dyn Fn() -> CheckResult + Send + Sync>;

/// Text reported for a passing check
pub const CHECK_OK: &str = "OK";

type CheckMap = RwLock<BTreeMap<String, Check>>;

/// Registry of liveness and readiness checks.
#[derive(Default)]
pub struct HealthHandler {
    liveness: CheckMap,
    readiness: CheckMap,
}

impl HealthHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a liveness check, replacing any check with the same name.
    pub fn add_liveness_check(&self, name: impl Into<String>, check: Check) {
        Self::insert(&self.liveness, name.into(), check);
    }

    /// Register a readiness check, replacing any check with the same name.
    pub fn add_readiness_check(&self, name: impl Into<String>, check: Check) {
        Self::insert(&self.readiness, name.into(), check);
    }

    fn insert(map: &CheckMap, name: String, check: Check) {
        map.write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, check);
    }

    fn snapshot(map: &CheckMap) -> Vec<(String, Check)> {
        map.read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, check)| (name.clone(), Arc::clone(check)))
            .collect()
    }

    /// Names of all registered checks, liveness first.
    pub fn check_names(&self) -> Vec<String> {
        Self::snapshot(&self.liveness)
            .into_iter()
            .chain(Self::snapshot(&self.readiness))
            .map(|(name, _)| name)
            .collect()
    }

    /// Run the liveness checks.
    pub fn live(&self) -> HealthReport {
        HealthReport::run(Self::snapshot(&self.liveness))
    }

    /// Run the liveness and readiness checks.
    pub fn ready(&self) -> HealthReport {
        let mut checks = Self::snapshot(&self.liveness);
        checks.extend(Self::snapshot(&self.readiness));
        HealthReport::run(checks)
    }
}

impl std::fmt::Debug for HealthHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthHandler")
            .field("checks", &self.check_names())
            .finish()
    }
}

/// Outcome of evaluating a set of checks
///
/// Serializes as a map of check name to `"OK"` or the failure message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HealthReport {
    results: BTreeMap<String, CheckResult>,
}

impl HealthReport {
    // Checks run outside the registry lock.
    fn run(checks: Vec<(String, Check)>) -> Self {
        let results = checks
            .into_iter()
            .map(|(name, check)| (name, check()))
            .collect();
        Self { results }
    }

    /// Whether every check passed. An empty report is healthy.
    pub fn is_healthy(&self) -> bool {
        self.results.values().all(Result::is_ok)
    }

    /// Whether the named check ran and passed
    pub fn passed(&self, name: &str) -> bool {
        matches!(self.results.get(name), Some(Ok(())))
    }

    /// Display text of the named check, if it ran
    pub fn outcome(&self, name: &str) -> Option<&str> {
        self.results.get(name).map(outcome_text)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

fn outcome_text(result: &CheckResult) -> &str {
    match result {
        Ok(()) => CHECK_OK,
        Err(e) => e.message(),
    }
}

impl Serialize for HealthReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.results.len()))?;
        for (name, result) in &self.results {
            map.serialize_entry(name, outcome_text(result))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passing() -> Check {
        Arc::new(|| Ok(()))
    }

    fn failing(msg: &'static str) -> Check {
        Arc::new(move || Err(CheckError::new(msg)))
    }

    #[test]
    fn test_empty_handler_is_healthy() {
        let handler = HealthHandler::new();
        assert!(handler.live().is_healthy());
        assert!(handler.ready().is_healthy());
        assert!(handler.ready().is_empty());
    }

    #[test]
    fn test_readiness_includes_liveness() {
        let handler = HealthHandler::new();
        handler.add_liveness_check("process", failing("wedged"));
        handler.add_readiness_check("dr", passing());

        let ready = handler.ready();
        assert!(!ready.is_healthy());
        assert_eq!(ready.len(), 2);
        assert_eq!(ready.outcome("process"), Some("wedged"));
        assert_eq!(ready.outcome("dr"), Some(CHECK_OK));
    }

    #[test]
    fn test_liveness_excludes_readiness() {
        let handler = HealthHandler::new();
        handler.add_readiness_check("dr", failing("down"));
        assert!(handler.live().is_healthy());
        assert!(!handler.ready().is_healthy());
    }

    #[test]
    fn test_same_name_replaces() {
        let handler = HealthHandler::new();
        handler.add_readiness_check("dr", failing("down"));
        handler.add_readiness_check("dr", passing());
        assert!(handler.ready().is_healthy());
        assert_eq!(handler.check_names(), vec!["dr".to_string()]);
    }

    #[test]
    fn test_report_serializes_as_map() {
        let handler = HealthHandler::new();
        handler.add_readiness_check("a", passing());
        handler.add_readiness_check("b", failing("broken"));
        let json = serde_json::to_value(handler.ready()).unwrap();
        assert_eq!(json, serde_json::json!({"a": "OK", "b": "broken"}));
    }

    #[test]
    fn test_failure_reading_ok_is_still_a_failure() {
        let handler = HealthHandler::new();
        handler.add_readiness_check("x", failing(CHECK_OK));
        let report = handler.ready();
        assert!(!report.is_healthy());
        assert!(!report.passed("x"));
        assert_eq!(report.outcome("x"), Some(CHECK_OK));
    }
}
