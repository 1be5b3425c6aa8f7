// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mikrotik_hotspot::{
    AppState, Config, MetricsRegistry, Outcome, RouterOperations, TenantRouterSettings,
    create_router,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tenant(host: &str) -> TenantRouterSettings {
    TenantRouterSettings {
        mikrotik_host: host.to_string(),
        mikrotik_port: "8728".to_string(),
        mikrotik_username: "admin".to_string(),
        mikrotik_password: secrecy::SecretString::from("password".to_string()),
    }
}

fn make_state(http_port: &str, tenants: Vec<(&str, TenantRouterSettings)>) -> Arc<AppState> {
    let config = Config {
        server_addr: "127.0.0.1:8080".to_string(),
        http_port: http_port.to_string(),
        timeout_secs: 2,
        tenants: tenants
            .into_iter()
            .map(|(id, settings)| (id.to_string(), settings))
            .collect::<HashMap<_, _>>(),
    };
    Arc::new(AppState {
        config,
        metrics: MetricsRegistry::new(),
        operations: RouterOperations::with_defaults().unwrap(),
    })
}

async fn send(state: Arc<AppState>, request: Request<Body>) -> (StatusCode, Value) {
    let resp = create_router(state).oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// --- /health endpoint ---

#[tokio::test]
async fn health_returns_ok_with_tenant_count() {
    let state = make_state("80", vec![("acme", tenant("10.0.0.1"))]);

    let (status, body) = send(state, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["tenants"], 1);
}

// --- /metrics endpoint ---

#[tokio::test]
async fn metrics_returns_200_with_openmetrics_content_type() {
    let state = make_state("80", vec![]);
    let app = create_router(state);

    let resp = app.oneshot(get("/metrics")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let ct = resp
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(
        ct.contains("openmetrics-text"),
        "Expected OpenMetrics content-type, got: {ct}"
    );
}

#[tokio::test]
async fn metrics_count_not_configured_calls() {
    let state = make_state("80", vec![]);

    let (status, _) = send(state.clone(), get("/mikrotik/interfaces/ghost")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(
        state
            .metrics
            .operation_count("interfaces", Outcome::NotConfigured),
        1
    );
    let text = state.metrics.encode_metrics().await.unwrap();
    assert!(text.contains("outcome=\"NotConfigured\""));
}

// --- router endpoints ---

#[tokio::test]
async fn unknown_tenant_is_bad_request() {
    let state = make_state("80", vec![("acme", tenant("10.0.0.1"))]);

    let (status, body) = send(state, get("/mikrotik/status/other")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["message"],
        "MikroTik settings not configured for this tenant"
    );
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn tenant_without_host_is_bad_request() {
    let state = make_state("80", vec![("acme", tenant("   "))]);

    let (status, body) = send(state, post_json("/mikrotik/reboot/acme", json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn status_returns_normalized_router_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/system/resource"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uptime": "1d2h",
            "cpu-load": "12",
            "total-memory": "1000",
            "free-memory": "250",
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/interface"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "ether1", "rx-byte": "4000", "tx-byte": "6000", "running": "true"},
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/ip/hotspot/active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{}, {}, {}])))
        .mount(&server)
        .await;

    let port = server.address().port().to_string();
    let state = make_state(&port, vec![("acme", tenant("127.0.0.1"))]);

    let (status, body) = send(state.clone(), get("/mikrotik/status/acme")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["uptime"], "1d2h");
    assert_eq!(data["memory_usage_percent"], 75.0);
    assert_eq!(data["active_users"], 3);
    assert_eq!(data["interfaces_count"], 1);
    assert_eq!(data["total_bandwidth"]["rx"], "3.91 KB");
    assert_eq!(state.metrics.operation_count("status", Outcome::Success), 1);
}

#[tokio::test]
async fn router_failure_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/interface"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let port = server.address().port().to_string();
    let state = make_state(&port, vec![("acme", tenant("127.0.0.1"))]);

    let (status, body) = send(state.clone(), get("/mikrotik/interfaces/acme")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Failed to get interfaces"), "{message}");
    assert!(message.contains("401"), "{message}");
    assert!(!message.contains("password"));
    assert_eq!(
        state.metrics.operation_count("interfaces", Outcome::Failure),
        1
    );
}

#[tokio::test]
async fn backup_returns_artifact_name() {
    let state = make_state("80", vec![("acme", tenant("127.0.0.1"))]);

    let (status, body) = send(state, post_json("/mikrotik/backup/acme", json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Backup created successfully");
    let name = body["data"]["backup_name"].as_str().unwrap();
    assert!(name.starts_with("backup_") && name.ends_with(".backup"));
}

#[tokio::test]
async fn restart_hotspot_omits_data() {
    let state = make_state("80", vec![("acme", tenant("127.0.0.1"))]);

    let (status, body) = send(
        state,
        post_json("/mikrotik/restart-hotspot/acme", json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn profiles_lists_simulated_profiles() {
    let state = make_state("80", vec![("acme", tenant("127.0.0.1"))]);

    let (status, body) = send(state, get("/mikrotik/profiles/acme")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

// --- /mikrotik/test-ddns ---

#[tokio::test]
async fn test_ddns_reports_ip_input() {
    let state = make_state("80", vec![]);

    let (status, body) = send(
        state,
        post_json("/mikrotik/test-ddns", json!({"host": " 192.168.88.1 "})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Host is already an IP address");
    assert_eq!(body["data"]["host"], "192.168.88.1");
    assert_eq!(body["data"]["resolved_ip"], "192.168.88.1");
    assert_eq!(body["data"]["is_ip"], true);
    assert_eq!(body["data"]["is_domain"], false);
}

#[tokio::test]
async fn test_ddns_requires_host() {
    let state = make_state("80", vec![]);

    let (status, body) = send(state, post_json("/mikrotik/test-ddns", json!({"host": ""}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Host is required");
}

// --- routing ---

#[tokio::test]
async fn unknown_route_is_not_found() {
    let state = make_state("80", vec![]);
    let app = create_router(state);

    let resp = app.oneshot(get("/mikrotik/unknown")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wrong_method_is_rejected() {
    let state = make_state("80", vec![("acme", tenant("127.0.0.1"))]);
    let app = create_router(state);

    let resp = app.oneshot(get("/mikrotik/reboot/acme")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
