// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use std::net::SocketAddr;
use std::sync::Arc;

use mikrotik_hotspot::{AppState, Config, MetricsRegistry, Result, RouterOperations, create_router};
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    setup_tracing();

    let config = Config::from_env();

    tracing::info!(
        "Loaded router settings for {} tenant(s)",
        config.tenants.len()
    );
    let mut tenants: Vec<_> = config.tenants.iter().collect();
    tenants.sort_by(|a, b| a.0.cmp(b.0));
    for (tenant, settings) in tenants {
        tracing::info!(
            "  - Tenant '{}' at {}:{}",
            tenant,
            settings.mikrotik_host,
            settings.mikrotik_port
        );
    }

    let metrics = MetricsRegistry::new();
    metrics.set_tenants_configured(config.tenants.len());

    let operations = RouterOperations::with_defaults().map_err(|e| {
        tracing::error!("Failed to build router client: {}", e);
        e
    })?;

    let addr: SocketAddr = config.server_addr.parse().map_err(|e| {
        tracing::error!("Invalid server address: {}", e);
        e
    })?;

    let state = Arc::new(AppState {
        config,
        metrics,
        operations,
    });

    // Graceful shutdown channel
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
        }
    });

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!("Failed to bind address: {}", e);
        e
    })?;

    tracing::info!("MikroTik hotspot service starting on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - GET  /health                              - Health check");
    tracing::info!("  - GET  /metrics                             - Prometheus metrics");
    tracing::info!("  - GET  /mikrotik/status/{{tenant_id}}          - Router status");
    tracing::info!("  - GET  /mikrotik/interfaces/{{tenant_id}}      - Interfaces");
    tracing::info!("  - GET  /mikrotik/ppp/{{tenant_id}}             - PPP sessions");
    tracing::info!("  - GET  /mikrotik/public-ip/{{tenant_id}}       - Public IPs");
    tracing::info!("  - GET  /mikrotik/profiles/{{tenant_id}}        - Hotspot profiles");
    tracing::info!("  - POST /mikrotik/test-connection/{{tenant_id}} - Connection test");
    tracing::info!("  - POST /mikrotik/test-ddns                    - DDNS resolution test");
    tracing::info!("  - POST /mikrotik/backup/{{tenant_id}}          - Create backup");
    tracing::info!("  - POST /mikrotik/restart-hotspot/{{tenant_id}} - Restart hotspot");
    tracing::info!("  - POST /mikrotik/reboot/{{tenant_id}}          - Reboot router");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
            tracing::info!("HTTP server shutting down");
        })
        .await
        .map_err(|e| {
            tracing::error!("Server error: {}", e);
            e
        })?;

    Ok(())
}

fn setup_tracing() {
    // RUST_LOG wins; "info" otherwise
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
