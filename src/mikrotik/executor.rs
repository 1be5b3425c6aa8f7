// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Stateful router commands
//!
//! Backups, restarts, reboots and profile listing go through
//! [`RouterCommandExecutor`] so a real implementation can replace
//! [`SimulatedExecutor`] without touching [`RouterOperations`](super::RouterOperations).

use async_trait::async_trait;

use super::types::{BackupInfo, HotspotProfile};
use crate::config::ConnectionConfig;
use crate::error::RouterError;

/// Commands that change router state or are not yet read from the device
#[async_trait]
pub trait RouterCommandExecutor: Send + Sync {
    async fn hotspot_profiles(
        &self,
        config: &ConnectionConfig,
    ) -> Result<Vec<HotspotProfile>, RouterError>;

    async fn create_backup(&self, config: &ConnectionConfig) -> Result<BackupInfo, RouterError>;

    async fn restart_hotspot(&self, config: &ConnectionConfig) -> Result<(), RouterError>;

    async fn reboot_router(&self, config: &ConnectionConfig) -> Result<(), RouterError>;
}

/// Acknowledges every command without contacting the router
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedExecutor;

#[async_trait]
impl RouterCommandExecutor for SimulatedExecutor {
    async fn hotspot_profiles(
        &self,
        _config: &ConnectionConfig,
    ) -> Result<Vec<HotspotProfile>, RouterError> {
        Ok(vec![
            profile("default", "1h", "30m", 1, "2M/1M"),
            profile("premium", "4h", "1h", 2, "10M/5M"),
            profile("guest", "30m", "15m", 1, "1M/512k"),
        ])
    }

    async fn create_backup(&self, config: &ConnectionConfig) -> Result<BackupInfo, RouterError> {
        let backup_name = backup_name(chrono::Local::now());
        tracing::info!("Backup created for {}: {}", config.host, backup_name);
        Ok(BackupInfo { backup_name })
    }

    async fn restart_hotspot(&self, config: &ConnectionConfig) -> Result<(), RouterError> {
        tracing::info!("Hotspot service restart requested for {}", config.host);
        Ok(())
    }

    async fn reboot_router(&self, config: &ConnectionConfig) -> Result<(), RouterError> {
        tracing::info!("Router reboot requested for {}", config.host);
        Ok(())
    }
}

fn profile(
    name: &str,
    session_timeout: &str,
    idle_timeout: &str,
    shared_users: u32,
    rate_limit: &str,
) -> HotspotProfile {
    HotspotProfile {
        name: name.to_string(),
        session_timeout: session_timeout.to_string(),
        idle_timeout: idle_timeout.to_string(),
        shared_users,
        rate_limit: rate_limit.to_string(),
        status: "active".to_string(),
    }
}

/// `backup_YYYY-mm-dd_HH-MM-SS.backup`
pub(crate) fn backup_name<Tz>(at: chrono::DateTime<Tz>) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("backup_{}.backup", at.format("%Y-%m-%d_%H-%M-%S"))
}
