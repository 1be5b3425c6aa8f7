// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Router endpoints
//!
//! Every handler resolves the tenant's connection settings, runs exactly one
//! router operation and passes the result through. Missing settings answer
//! 400 before any router traffic.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::api::{AppState, ApiResponse};
use crate::config::ConnectionConfig;
use crate::metrics::Outcome;
use crate::mikrotik::{OperationResult, RouterOperations};

const NOT_CONFIGURED: &str = "MikroTik settings not configured for this tenant";

/// Body of `POST /mikrotik/test-ddns`
#[derive(Debug, Deserialize)]
pub struct DdnsRequest {
    #[serde(default)]
    pub host: String,
}

/// Looks up the tenant, runs `call` and records the outcome
async fn run<T, F, Fut>(
    state: &AppState,
    tenant_id: &str,
    operation: &'static str,
    call: F,
) -> Response
where
    T: Serialize,
    F: FnOnce(RouterOperations, ConnectionConfig) -> Fut,
    Fut: Future<Output = OperationResult<T>>,
{
    let start = Instant::now();

    let Some(config) = state.config.connection_for(tenant_id) else {
        tracing::debug!("{} requested for unconfigured tenant '{}'", operation, tenant_id);
        state
            .metrics
            .record_operation(operation, Outcome::NotConfigured, start.elapsed());
        return (StatusCode::BAD_REQUEST, ApiResponse::failure(NOT_CONFIGURED)).into_response();
    };

    let result = call(state.operations.clone(), config).await;
    let outcome = match &result {
        Ok(_) => Outcome::Success,
        Err(e) if e.is_not_configured() => Outcome::NotConfigured,
        Err(e) => {
            tracing::warn!("{} failed for tenant '{}': {}", operation, tenant_id, e);
            Outcome::Failure
        }
    };
    state
        .metrics
        .record_operation(operation, outcome, start.elapsed());

    ApiResponse::from_result(result).into_response()
}

/// GET /mikrotik/status/{tenant_id}
pub async fn router_status(
    State(state): State<Arc<AppState>>,
    Path(tenant_id): Path<String>,
) -> Response {
    run(&state, &tenant_id, "status", |ops, config| async move {
        ops.get_router_status(&config).await
    })
    .await
}

/// GET /mikrotik/interfaces/{tenant_id}
pub async fn interfaces(
    State(state): State<Arc<AppState>>,
    Path(tenant_id): Path<String>,
) -> Response {
    run(&state, &tenant_id, "interfaces", |ops, config| async move {
        ops.get_interfaces(&config).await
    })
    .await
}

/// GET /mikrotik/ppp/{tenant_id}
pub async fn ppp_connections(
    State(state): State<Arc<AppState>>,
    Path(tenant_id): Path<String>,
) -> Response {
    run(&state, &tenant_id, "ppp_connections", |ops, config| async move {
        ops.get_ppp_connections(&config).await
    })
    .await
}

/// GET /mikrotik/public-ip/{tenant_id}
pub async fn public_ip(
    State(state): State<Arc<AppState>>,
    Path(tenant_id): Path<String>,
) -> Response {
    run(&state, &tenant_id, "public_ip", |ops, config| async move {
        ops.get_public_ip(&config).await
    })
    .await
}

/// GET /mikrotik/profiles/{tenant_id}
pub async fn hotspot_profiles(
    State(state): State<Arc<AppState>>,
    Path(tenant_id): Path<String>,
) -> Response {
    run(&state, &tenant_id, "profiles", |ops, config| async move {
        ops.get_hotspot_profiles(&config).await
    })
    .await
}

/// POST /mikrotik/test-connection/{tenant_id}
pub async fn test_connection(
    State(state): State<Arc<AppState>>,
    Path(tenant_id): Path<String>,
) -> Response {
    run(&state, &tenant_id, "test_connection", |ops, config| async move {
        ops.test_connection(&config).await
    })
    .await
}

/// POST /mikrotik/backup/{tenant_id}
pub async fn create_backup(
    State(state): State<Arc<AppState>>,
    Path(tenant_id): Path<String>,
) -> Response {
    run(&state, &tenant_id, "backup", |ops, config| async move {
        ops.create_backup(&config).await
    })
    .await
}

/// POST /mikrotik/restart-hotspot/{tenant_id}
pub async fn restart_hotspot(
    State(state): State<Arc<AppState>>,
    Path(tenant_id): Path<String>,
) -> Response {
    run(&state, &tenant_id, "restart_hotspot", |ops, config| async move {
        ops.restart_hotspot(&config).await
    })
    .await
}

/// POST /mikrotik/reboot/{tenant_id}
pub async fn reboot_router(
    State(state): State<Arc<AppState>>,
    Path(tenant_id): Path<String>,
) -> Response {
    run(&state, &tenant_id, "reboot", |ops, config| async move {
        ops.reboot_router(&config).await
    })
    .await
}

/// POST /mikrotik/test-ddns
pub async fn test_ddns(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DdnsRequest>,
) -> Response {
    let host = request.host.trim();
    if host.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            ApiResponse::failure("Host is required"),
        )
            .into_response();
    }

    let start = Instant::now();
    let report = state.operations.test_resolution(host).await;
    let outcome = if report.succeeded() {
        Outcome::Success
    } else {
        Outcome::Failure
    };
    state
        .metrics
        .record_operation("test_ddns", outcome, start.elapsed());

    ApiResponse::from_report(&report).into_response()
}
