//! HTTP API module for the MikroTik hotspot service
//!
//! A thin controller layer: looks up the tenant's router settings, runs one
//! router operation and passes its result through as JSON.
//!
//! # Endpoints
//! - `GET /health` — health check
//! - `GET /metrics` — Prometheus metrics
//! - `GET /mikrotik/status/{tenant_id}` — router status
//! - `GET /mikrotik/interfaces/{tenant_id}` — interface list
//! - `GET /mikrotik/ppp/{tenant_id}` — active PPP sessions
//! - `GET /mikrotik/public-ip/{tenant_id}` — public IPs from PPP caller ids
//! - `GET /mikrotik/profiles/{tenant_id}` — hotspot profiles
//! - `POST /mikrotik/test-connection/{tenant_id}` — connectivity and credential check
//! - `POST /mikrotik/test-ddns` — DDNS resolution diagnostic
//! - `POST /mikrotik/backup/{tenant_id}` — create a backup
//! - `POST /mikrotik/restart-hotspot/{tenant_id}` — restart the hotspot service
//! - `POST /mikrotik/reboot/{tenant_id}` — reboot the router

pub mod handlers;
mod response;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::config::Config;
use crate::metrics::MetricsRegistry;
use crate::mikrotik::RouterOperations;

pub use response::ApiResponse;

/// Application state shared with endpoints
pub struct AppState {
    pub config: Config,
    pub metrics: MetricsRegistry,
    pub operations: RouterOperations,
}

/// Creates the main Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .route("/mikrotik/status/{tenant_id}", get(handlers::router_status))
        .route("/mikrotik/interfaces/{tenant_id}", get(handlers::interfaces))
        .route("/mikrotik/ppp/{tenant_id}", get(handlers::ppp_connections))
        .route("/mikrotik/public-ip/{tenant_id}", get(handlers::public_ip))
        .route("/mikrotik/profiles/{tenant_id}", get(handlers::hotspot_profiles))
        .route(
            "/mikrotik/test-connection/{tenant_id}",
            post(handlers::test_connection),
        )
        .route("/mikrotik/test-ddns", post(handlers::test_ddns))
        .route("/mikrotik/backup/{tenant_id}", post(handlers::create_backup))
        .route(
            "/mikrotik/restart-hotspot/{tenant_id}",
            post(handlers::restart_hotspot),
        )
        .route("/mikrotik/reboot/{tenant_id}", post(handlers::reboot_router))
        .with_state(state)
}
