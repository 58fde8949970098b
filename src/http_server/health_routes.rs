//! Health HTTP Routes
//!
//! - `GET /live`       liveness checks
//! - `GET /ready`      liveness and readiness checks
//! - `GET /identity`   local member identity, without credentials
//! - `GET /dr/status`  latest DR replication status, or `null`
//!
//! `/live` and `/ready` answer 200 when every check passes and 503
//! otherwise. With `?full=1` the body maps each check name to `"OK"` or
//! its failure message; without it the body is an empty object.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::cluster::IdentitySummary;
use crate::dr_replication::ReplicationStatusStore;
use crate::health::{HealthHandler, HealthReport};

/// State shared across health handlers
pub struct HealthState {
    pub checks: Arc<HealthHandler>,
    pub store: Arc<ReplicationStatusStore>,
    pub identity: Option<IdentitySummary>,
}

impl HealthState {
    pub fn new(checks: Arc<HealthHandler>, store: Arc<ReplicationStatusStore>) -> Self {
        Self {
            checks,
            store,
            identity: None,
        }
    }

    pub fn with_identity(mut self, identity: IdentitySummary) -> Self {
        self.identity = Some(identity);
        self
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct HealthQuery {
    full: Option<String>,
}

impl HealthQuery {
    fn is_full(&self) -> bool {
        self.full.as_deref() == Some("1")
    }
}

/// Create health routes
pub fn health_routes(state: Arc<HealthState>) -> Router {
    Router::new()
        .route("/live", get(live_handler))
        .route("/ready", get(ready_handler))
        .route("/identity", get(identity_handler))
        .route("/dr/status", get(dr_status_handler))
        .with_state(state)
}

fn report_response(report: HealthReport, query: &HealthQuery) -> Response {
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    if query.is_full() {
        (status, Json(report)).into_response()
    } else {
        (status, Json(json!({}))).into_response()
    }
}

async fn live_handler(
    State(state): State<Arc<HealthState>>,
    Query(query): Query<HealthQuery>,
) -> Response {
    report_response(state.checks.live(), &query)
}

async fn ready_handler(
    State(state): State<Arc<HealthState>>,
    Query(query): Query<HealthQuery>,
) -> Response {
    report_response(state.checks.ready(), &query)
}

async fn identity_handler(State(state): State<Arc<HealthState>>) -> Response {
    match &state.identity {
        Some(identity) => (StatusCode::OK, Json(identity.clone())).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "identity not resolved"})),
        )
            .into_response(),
    }
}

async fn dr_status_handler(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.store.get()))
}
