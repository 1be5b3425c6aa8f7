// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Normalized results returned by router operations

use serde::Serialize;

/// Successful operation result with an optional human-readable message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Success<T> {
    pub message: Option<String>,
    pub data: T,
}

impl<T> Success<T> {
    pub fn new(data: T) -> Self {
        Self {
            message: None,
            data,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            data,
        }
    }
}

/// Summed traffic counters, human readable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bandwidth {
    pub rx: String,
    pub tx: String,
}

/// Router health snapshot, recomputed on every call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouterStatus {
    pub uptime: String,
    /// CPU load with a `%` suffix, e.g. `"10%"`
    pub cpu_load: String,
    pub memory_usage_percent: f64,
    pub active_users: usize,
    pub total_bandwidth: Bandwidth,
    pub interfaces_count: usize,
    pub free_memory: String,
    pub total_memory: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceStatus {
    Running,
    Disabled,
}

/// One interface as reported by the router at call time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceInfo {
    pub name: String,
    pub mac: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: InterfaceStatus,
    pub rx: String,
    pub tx: String,
    pub mtu: String,
    pub disabled: bool,
}

/// Active PPP session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PppConnection {
    pub name: String,
    pub service: String,
    pub caller_id: String,
    pub address: String,
    pub uptime: String,
    pub encoding: String,
    pub session_id: String,
}

/// Externally visible address taken from a PPP session's caller id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicIpEntry {
    pub connection_name: String,
    pub public_ip: String,
    pub service: String,
    pub uptime: String,
}

/// Identity reported by a successful connection test
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouterInfo {
    pub host: String,
    pub port: String,
    pub identity: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotspotProfile {
    pub name: String,
    pub session_timeout: String,
    pub idle_timeout: String,
    pub shared_users: u32,
    pub rate_limit: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupInfo {
    pub backup_name: String,
}
