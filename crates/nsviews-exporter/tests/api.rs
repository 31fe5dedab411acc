//! Startup registration and introspection handlers.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use axum::{
    body::to_bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use nsviews_core::{Aggregation, NamespaceViewRegistry, StatsProvider, ViewDescriptor};
use nsviews_exporter::{api, app_state::AppState, config, error::ExporterError, ops};

const CONFIG: &str = r#"
version: 1
namespaces:
  - id: "http"
    views:
      - name: "http/requests"
        measure: "http/latency_ms"
        aggregation: { kind: count }
      - name: "http/latency"
        measure: "http/latency_ms"
        aggregation: { kind: distribution, bounds: [5, 10, 50] }
  - id: "db"
    views:
      - name: "db/queries"
        measure: "db/query_ms"
        aggregation: { kind: sum }
"#;

fn state() -> AppState {
    AppState::new(config::load_from_str(CONFIG).unwrap()).unwrap()
}

async fn json_body(resp: Response) -> (StatusCode, Value) {
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn view_names(v: &Value) -> Vec<String> {
    v["views"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn startup_registers_configured_namespaces() {
    let state = state();
    let reg = state.registry();
    assert_eq!(reg.namespaces(), ["db", "http"]);
    assert_eq!(reg.all_views().len(), 3);
    assert!(reg.provider().is_active("http/latency"));
}

#[test]
fn startup_fails_on_provider_rejection() {
    let bad = r#"
version: 1
namespaces:
  - id: "http"
    views:
      - name: "http/latency"
        measure: ""
        aggregation: { kind: count }
"#;
    let err = AppState::new(config::load_from_str(bad).unwrap()).err().expect("must fail");
    assert!(matches!(err, ExporterError::Register { ref namespace, .. } if namespace == "http"));
    assert_eq!(err.code().as_str(), "ACTIVATION_FAILED");
}

#[test]
fn legacy_mode_fails_first_registration() {
    let cfg = r#"
version: 1
registry:
  duplicate_check: legacy
namespaces:
  - id: "http"
"#;
    let err = AppState::new(config::load_from_str(cfg).unwrap()).err().expect("must fail");
    assert_eq!(err.code().as_str(), "DUPLICATE_NAMESPACE");
}

#[test]
fn shared_registry_rejects_taken_namespace() {
    let registry = Arc::new(NamespaceViewRegistry::new(StatsProvider::new()));
    registry
        .register("db", [Arc::new(ViewDescriptor::new("db/pool", "db/conns", Aggregation::LastValue))])
        .unwrap();

    let err = AppState::with_registry(config::load_from_str(CONFIG).unwrap(), registry)
        .err()
        .expect("must fail");
    assert_eq!(err.code().as_str(), "DUPLICATE_NAMESPACE");
}

#[tokio::test]
async fn list_views_sorted_by_name() {
    let (status, body) = json_body(api::list_views(State(state())).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view_names(&body), ["db/queries", "http/latency", "http/requests"]);
    assert_eq!(body["views"][1]["aggregation"]["kind"], "distribution");
}

#[tokio::test]
async fn list_namespaces() {
    let (status, body) = json_body(api::list_namespaces(State(state())).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["namespaces"], serde_json::json!(["db", "http"]));
}

#[tokio::test]
async fn namespace_views_in_registration_order() {
    let resp = api::namespace_views(State(state()), Path("http".to_string())).await;
    let (status, body) = json_body(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["namespace"], "http");
    assert_eq!(view_names(&body), ["http/requests", "http/latency"]);
}

#[tokio::test]
async fn unknown_namespace_is_404() {
    let resp = api::namespace_views(State(state()), Path("grpc".to_string())).await;
    let (status, body) = json_body(resp).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "UNREGISTERED_NAMESPACE");
    assert_eq!(body["msg"], "no views found registered under namespace grpc");
}

#[tokio::test]
async fn readyz_reports_draining() {
    let state = state();
    let resp = ops::readyz(State(state.clone())).await.into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    state.set_draining();
    let resp = ops::readyz(State(state)).await.into_response();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}
