//! Health Endpoint Tests
//!
//! `/live` and `/ready` status codes and bodies, with and without the DR
//! readiness check registered.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use mysql_agent::cluster::{ClusterEnv, MemberIdentity, Secret, StaticHostname, MYSQL_DB_PORT};
use mysql_agent::dr_replication::{
    new_dr_health_check, DrReplicationStatus, ReplicationStatus, ReplicationStatusStore,
    DR_CHECK_NAME,
};
use mysql_agent::health::{CheckError, HealthHandler, CHECK_OK};
use mysql_agent::http_server::{health_routes, HealthState};

fn router_with_dr(store: &Arc<ReplicationStatusStore>) -> Router {
    let checks = HealthHandler::new();
    let check = new_dr_health_check(Some("mysql-dr"), Arc::clone(store)).unwrap();
    checks.add_readiness_check(DR_CHECK_NAME, check);
    health_routes(Arc::new(HealthState::new(Arc::new(checks), Arc::clone(store))))
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_ready_before_any_status() {
    let store = Arc::new(ReplicationStatusStore::new());
    let (status, body) = get(router_with_dr(&store), "/ready?full=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ DR_CHECK_NAME: "OK" }));
}

#[tokio::test]
async fn test_not_ready_when_dr_replication_fails() {
    let store = Arc::new(ReplicationStatusStore::new());
    store.set(&DrReplicationStatus::new(
        true,
        false,
        ReplicationStatus::SqlThreadError,
    ));

    let (status, body) = get(router_with_dr(&store), "/ready?full=1").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let reason = body[DR_CHECK_NAME].as_str().unwrap();
    assert!(reason.contains("replication SQL thread Error"));

    let (status, body) = get(router_with_dr(&store), "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_not_ready_when_failure_message_reads_ok() {
    let store = Arc::new(ReplicationStatusStore::new());
    let checks = HealthHandler::new();
    checks.add_readiness_check("quorum", Arc::new(|| Err(CheckError::new(CHECK_OK))));
    let router = health_routes(Arc::new(HealthState::new(Arc::new(checks), store)));

    let (status, body) = get(router, "/ready?full=1").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({ "quorum": "OK" }));
}

#[tokio::test]
async fn test_live_ignores_readiness_checks() {
    let store = Arc::new(ReplicationStatusStore::new());
    store.set(&DrReplicationStatus::new(
        true,
        false,
        ReplicationStatus::IoThreadError,
    ));
    let (status, _) = get(router_with_dr(&store), "/live").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_dr_status_endpoint() {
    let store = Arc::new(ReplicationStatusStore::new());
    let (_, body) = get(router_with_dr(&store), "/dr/status").await;
    assert_eq!(body, Value::Null);

    store.set(&DrReplicationStatus::new(true, true, ReplicationStatus::On));
    let (status, body) = get(router_with_dr(&store), "/dr/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"need_dr_repl": true, "status": true, "reason": "ON"})
    );
}

#[tokio::test]
async fn test_identity_endpoint() {
    let env = ClusterEnv {
        use_host_network: false,
        namespace: "db".to_string(),
        cluster_name: "mysql-cluster".to_string(),
        multi_master: false,
        pod_ip: Some("10.0.0.5".parse().unwrap()),
        pod_name: None,
        root_password: Secret::new("topsecret"),
        dr_host: None,
        port: MYSQL_DB_PORT,
    };
    let member =
        MemberIdentity::local(&env, &StaticHostname("mysql-cluster-0".to_string())).unwrap();
    let state = HealthState::new(
        Arc::new(HealthHandler::new()),
        Arc::new(ReplicationStatusStore::new()),
    )
    .with_identity(member.summary());

    let (status, body) = get(health_routes(Arc::new(state)), "/identity").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "mysql-cluster-0.mysql-cluster");
    assert_eq!(body["ordinal"], 0);
    assert_eq!(body["whitelist_cidr"], "10.0.0.0/8");
    assert!(!body.to_string().contains("topsecret"));
}

#[tokio::test]
async fn test_identity_endpoint_without_identity() {
    let state = HealthState::new(
        Arc::new(HealthHandler::new()),
        Arc::new(ReplicationStatusStore::new()),
    );
    let (status, _) = get(health_routes(Arc::new(state)), "/identity").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
