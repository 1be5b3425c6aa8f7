// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! RouterOS REST response normalization
//!
//! The REST API reports most values as strings (`"rx-byte": "1234"`,
//! `"running": "true"`) but some firmware and proxies hand back native JSON
//! numbers and booleans. Everything here accepts both and never fails: a
//! missing or unparsable field degrades to its default.

use serde_json::Value;

use super::types::{Bandwidth, InterfaceInfo, InterfaceStatus, PppConnection, PublicIpEntry};

const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Placeholder for fields the router did not report
pub const UNKNOWN: &str = "Unknown";

/// Raw per-interface traffic counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrafficCounters {
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

impl TrafficCounters {
    pub fn from_raw(raw: &Value) -> Self {
        Self {
            rx_bytes: field_u64(raw, "rx-byte").unwrap_or(0),
            tx_bytes: field_u64(raw, "tx-byte").unwrap_or(0),
        }
    }
}

/// Formats a byte count with the largest unit keeping the mantissa below 1024
///
/// Rounded to two decimals with trailing zeros dropped: `1536 -> "1.5 KB"`.
/// Values beyond the TB range stay in TB.
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, BYTE_UNITS[unit])
}

/// Used memory as a percentage of `total`, one decimal; `0.0` when `total` is zero
#[allow(clippy::cast_precision_loss)]
pub fn memory_usage_percent(total: u64, free: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let used = total.saturating_sub(free) as f64;
    (used / total as f64 * 1000.0).round() / 10.0
}

/// Sums raw counters across interfaces, then formats the totals
pub fn aggregate_bandwidth(interfaces: &[TrafficCounters]) -> Bandwidth {
    let (rx, tx) = interfaces.iter().fold((0u64, 0u64), |(rx, tx), c| {
        (rx.saturating_add(c.rx_bytes), tx.saturating_add(c.tx_bytes))
    });
    Bandwidth {
        rx: format_bytes(rx),
        tx: format_bytes(tx),
    }
}

/// Maps one `/interface` entry, defaulting whatever the router left out
pub fn map_interface(raw: &Value) -> InterfaceInfo {
    let counters = TrafficCounters::from_raw(raw);
    let running = field_bool(raw, "running").unwrap_or(false);
    InterfaceInfo {
        name: field_string(raw, "name").unwrap_or_else(|| UNKNOWN.to_string()),
        mac: field_string(raw, "mac-address").unwrap_or_else(|| UNKNOWN.to_string()),
        kind: field_string(raw, "type").unwrap_or_else(|| UNKNOWN.to_string()),
        status: if running {
            InterfaceStatus::Running
        } else {
            InterfaceStatus::Disabled
        },
        rx: format_bytes(counters.rx_bytes),
        tx: format_bytes(counters.tx_bytes),
        mtu: field_string(raw, "mtu").unwrap_or_else(|| UNKNOWN.to_string()),
        disabled: field_bool(raw, "disabled").unwrap_or(false),
    }
}

/// Maps one `/ppp/active` entry
pub fn map_ppp_connection(raw: &Value) -> PppConnection {
    let get = |key: &str| field_string(raw, key).unwrap_or_else(|| UNKNOWN.to_string());
    PppConnection {
        name: get("name"),
        service: get("service"),
        caller_id: get("caller-id"),
        address: get("address"),
        uptime: get("uptime"),
        encoding: get("encoding"),
        session_id: get("session-id"),
    }
}

/// Sessions whose caller id carries a usable address
pub fn public_ips(connections: &[PppConnection]) -> Vec<PublicIpEntry> {
    connections
        .iter()
        .filter(|c| !c.caller_id.trim().is_empty() && c.caller_id != UNKNOWN)
        .map(|c| PublicIpEntry {
            connection_name: c.name.clone(),
            public_ip: c.caller_id.clone(),
            service: c.service.clone(),
            uptime: c.uptime.clone(),
        })
        .collect()
}

/// Elements of a listing response; a lone object counts as a one-element list
pub fn as_list(raw: &Value) -> Vec<&Value> {
    match raw {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![raw],
        _ => Vec::new(),
    }
}

/// First object of a single-record response (`/system/resource` may come back wrapped)
pub fn as_record(raw: &Value) -> &Value {
    match raw {
        Value::Array(items) => items.first().unwrap_or(&Value::Null),
        _ => raw,
    }
}

/// Non-negative integer from a JSON number or numeric string
pub fn field_u64(raw: &Value, key: &str) -> Option<u64> {
    match raw.get(key)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Boolean from a JSON bool or `"true"`/`"false"` (also `"yes"`/`"no"`)
pub fn field_bool(raw: &Value, key: &str) -> Option<bool> {
    match raw.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Non-empty text from a JSON string, number or bool
pub fn field_string(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
