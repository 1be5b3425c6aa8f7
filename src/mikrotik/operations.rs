// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! High-level router operations
//!
//! Each operation is one independent request/response cycle: it validates the
//! connection config, resolves the host, talks to the router and normalizes the
//! answer. Every failure comes back as an [`OperationError`].

use futures_util::future::join3;
use serde_json::Value;
use std::sync::Arc;

use super::client::RouterApiClient;
use super::executor::{RouterCommandExecutor, SimulatedExecutor};
use super::normalize::{
    TrafficCounters, aggregate_bandwidth, as_list, as_record, field_string, field_u64,
    format_bytes, map_interface, map_ppp_connection, memory_usage_percent, public_ips,
};
use super::resolver::{HostResolver, ResolutionReport};
use super::types::{
    BackupInfo, HotspotProfile, InterfaceInfo, PppConnection, PublicIpEntry, RouterInfo,
    RouterStatus, Success,
};
use crate::config::ConnectionConfig;
use crate::error::{AppError, OperationError};

/// Result of every router operation
pub type OperationResult<T> = std::result::Result<Success<T>, OperationError>;

mod endpoints {
    pub const IDENTITY: &str = "/system/identity";
    pub const RESOURCE: &str = "/system/resource";
    pub const INTERFACES: &str = "/interface";
    pub const HOTSPOT_ACTIVE: &str = "/ip/hotspot/active";
    pub const PPP_ACTIVE: &str = "/ppp/active";
}

const DEFAULT_IDENTITY: &str = "MikroTik Router";
const UNKNOWN_VERSION: &str = "Unknown";

/// Router operations shared by all tenants
///
/// Holds no per-router state, so one instance can serve concurrent calls for
/// different [`ConnectionConfig`]s.
#[derive(Clone)]
pub struct RouterOperations {
    client: RouterApiClient,
    executor: Arc<dyn RouterCommandExecutor>,
}

impl std::fmt::Debug for RouterOperations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterOperations")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl RouterOperations {
    pub fn new(client: RouterApiClient, executor: Arc<dyn RouterCommandExecutor>) -> Self {
        Self { client, executor }
    }

    /// System resolver, real HTTP client and simulated stateful commands
    pub fn with_defaults() -> Result<Self, AppError> {
        let client = RouterApiClient::new(HostResolver::default())?;
        Ok(Self::new(client, Arc::new(SimulatedExecutor)))
    }

    /// Checks the router is reachable and accepts the credentials
    ///
    /// The version lookup is best effort and falls back to `"Unknown"`.
    pub async fn test_connection(&self, config: &ConnectionConfig) -> OperationResult<RouterInfo> {
        ensure_configured(config)?;

        let identity = self
            .client
            .get(config, endpoints::IDENTITY)
            .await
            .map_err(|e| {
                tracing::error!("MikroTik connection to {} failed: {}", config.host, e);
                OperationError::request("MikroTik connection failed")(e)
            })?;

        let version = match self.client.get(config, endpoints::RESOURCE).await {
            Ok(resource) => field_string(as_record(&resource), "version"),
            Err(e) => {
                tracing::warn!("Could not read RouterOS version from {}: {}", config.host, e);
                None
            }
        };

        let info = RouterInfo {
            host: config.host.clone(),
            port: config.port.clone(),
            identity: field_string(as_record(&identity), "name")
                .unwrap_or_else(|| DEFAULT_IDENTITY.to_string()),
            version: version.unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
        };
        Ok(Success::with_message(info, "Connection successful"))
    }

    /// Resource usage, traffic totals and hotspot session count
    ///
    /// Only the resource fetch is required. Interface and session listings that
    /// fail count as empty.
    pub async fn get_router_status(
        &self,
        config: &ConnectionConfig,
    ) -> OperationResult<RouterStatus> {
        ensure_configured(config)?;

        let (resource, interfaces, sessions) = join3(
            self.client.get(config, endpoints::RESOURCE),
            self.client.get(config, endpoints::INTERFACES),
            self.client.get(config, endpoints::HOTSPOT_ACTIVE),
        )
        .await;

        let resource = resource.map_err(|e| {
            tracing::error!("Failed to get router status from {}: {}", config.host, e);
            OperationError::request("Failed to get system resource info")(e)
        })?;
        let interfaces = optional_listing(interfaces, "interface list", config);
        let sessions = optional_listing(sessions, "hotspot sessions", config);

        let resource = as_record(&resource);
        let total_memory = field_u64(resource, "total-memory").unwrap_or(0);
        let free_memory = field_u64(resource, "free-memory").unwrap_or(0);
        let interfaces = as_list(&interfaces);
        let counters: Vec<TrafficCounters> = interfaces
            .iter()
            .map(|raw| TrafficCounters::from_raw(raw))
            .collect();

        let status = RouterStatus {
            uptime: field_string(resource, "uptime").unwrap_or_else(|| "Unknown".to_string()),
            cpu_load: format!("{}%", field_u64(resource, "cpu-load").unwrap_or(0)),
            memory_usage_percent: memory_usage_percent(total_memory, free_memory),
            active_users: as_list(&sessions).len(),
            total_bandwidth: aggregate_bandwidth(&counters),
            interfaces_count: interfaces.len(),
            free_memory: format_bytes(free_memory),
            total_memory: format_bytes(total_memory),
        };
        tracing::trace!(
            "Router {} status: {} interfaces, CPU: {}, memory {}%",
            config.host,
            status.interfaces_count,
            status.cpu_load,
            status.memory_usage_percent
        );
        Ok(Success::new(status))
    }

    pub async fn get_interfaces(
        &self,
        config: &ConnectionConfig,
    ) -> OperationResult<Vec<InterfaceInfo>> {
        ensure_configured(config)?;

        let raw = self
            .client
            .get(config, endpoints::INTERFACES)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get interfaces from {}: {}", config.host, e);
                OperationError::request("Failed to get interfaces")(e)
            })?;

        let interfaces = as_list(&raw).into_iter().map(map_interface).collect();
        Ok(Success::new(interfaces))
    }

    pub async fn get_ppp_connections(
        &self,
        config: &ConnectionConfig,
    ) -> OperationResult<Vec<PppConnection>> {
        ensure_configured(config)?;

        let raw = self
            .client
            .get(config, endpoints::PPP_ACTIVE)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get PPP connections from {}: {}", config.host, e);
                OperationError::request("Failed to get PPP connections")(e)
            })?;

        let connections = as_list(&raw).into_iter().map(map_ppp_connection).collect();
        Ok(Success::new(connections))
    }

    /// Public addresses seen as caller ids of active PPP sessions
    ///
    /// Finding none is a success with an empty list.
    pub async fn get_public_ip(
        &self,
        config: &ConnectionConfig,
    ) -> OperationResult<Vec<PublicIpEntry>> {
        ensure_configured(config)?;

        let connections = match self.get_ppp_connections(config).await {
            Ok(found) => found.data,
            Err(OperationError::Request { source, .. }) => {
                return Err(OperationError::request(
                    "Failed to get PPP connections for IP detection",
                )(source));
            }
            Err(e) => return Err(e),
        };

        let entries = public_ips(&connections);
        let message = if entries.is_empty() {
            "No public IPs found".to_string()
        } else {
            format!("Found {} public IP(s)", entries.len())
        };
        Ok(Success::with_message(entries, message))
    }

    pub async fn get_hotspot_profiles(
        &self,
        config: &ConnectionConfig,
    ) -> OperationResult<Vec<HotspotProfile>> {
        ensure_configured(config)?;

        let profiles = self
            .executor
            .hotspot_profiles(config)
            .await
            .map_err(OperationError::request("Failed to get hotspot profiles"))?;
        Ok(Success::new(profiles))
    }

    pub async fn create_backup(&self, config: &ConnectionConfig) -> OperationResult<BackupInfo> {
        ensure_configured(config)?;

        let backup = self
            .executor
            .create_backup(config)
            .await
            .map_err(OperationError::request("Failed to create backup"))?;
        Ok(Success::with_message(backup, "Backup created successfully"))
    }

    pub async fn restart_hotspot(&self, config: &ConnectionConfig) -> OperationResult<()> {
        ensure_configured(config)?;

        self.executor
            .restart_hotspot(config)
            .await
            .map_err(OperationError::request("Failed to restart hotspot"))?;
        Ok(Success::with_message((), "Hotspot service restarted successfully"))
    }

    pub async fn reboot_router(&self, config: &ConnectionConfig) -> OperationResult<()> {
        ensure_configured(config)?;

        self.executor
            .reboot_router(config)
            .await
            .map_err(OperationError::request("Failed to reboot router"))?;
        Ok(Success::with_message((), "Router reboot initiated successfully"))
    }

    /// DDNS diagnostic: distinguishes IP input, resolved domain and failed domain
    ///
    /// Never needs router credentials. The report carries its own outcome.
    pub async fn test_resolution(&self, host: &str) -> ResolutionReport {
        self.client.resolver().test_resolution(host.trim()).await
    }
}

fn ensure_configured(config: &ConnectionConfig) -> Result<(), OperationError> {
    if config.is_configured() {
        Ok(())
    } else {
        Err(OperationError::NotConfigured)
    }
}

/// Auxiliary listing: a failed fetch degrades to an empty list
fn optional_listing(
    result: Result<Value, crate::error::RouterError>,
    what: &str,
    config: &ConnectionConfig,
) -> Value {
    result.unwrap_or_else(|e| {
        tracing::warn!("Ignoring failed {} fetch from {}: {}", what, config.host, e);
        Value::Array(Vec::new())
    })
}
