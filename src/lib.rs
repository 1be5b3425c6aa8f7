// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! # MikroTik Hotspot
//!
//! Multi-tenant integration service for MikroTik RouterOS hotspot routers.
//!
//! Each call looks up the tenant's router settings, talks to the RouterOS
//! REST API and returns a normalized JSON result. No router state is kept
//! between calls.
//!
//! ## Main modules
//! - `api`: HTTP endpoints and response envelope
//! - `config`: configuration management
//! - `error`: error types
//! - `metrics`: Prometheus metrics for served operations
//! - `mikrotik`: router client, host resolution and operations
//! - `prelude`: commonly used types and traits

mod api;
mod config;
mod error;
mod metrics;
pub mod mikrotik;
pub mod prelude;

// Re-export commonly used types
/// Application configuration
pub use config::{Config, ConnectionConfig, TenantRouterSettings};

/// Error types and result alias
pub use error::{AppError, OperationError, Result, RouterError};

/// HTTP API router, state and response envelope
pub use api::{ApiResponse, AppState, create_router};

/// Metrics registry and outcome label
pub use metrics::{MetricsRegistry, Outcome};

/// Router operations and their result types
pub use mikrotik::{
    BackupInfo, Bandwidth, HostResolver, HotspotProfile, InterfaceInfo, OperationResult,
    PppConnection, PublicIpEntry, ResolutionReport, RouterApiClient, RouterInfo,
    RouterOperations, RouterStatus, Success,
};
