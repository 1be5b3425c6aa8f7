//! `MikroTik` `RouterOS` REST integration
//!
//! This module resolves router hosts, talks to the `RouterOS` REST API over
//! HTTP with Basic auth, and normalizes what the router reports into stable
//! result types.

mod client;
mod executor;
mod normalize;
mod operations;
mod resolver;
mod types;

// Re-export public types and functions
pub use client::{HttpMethod, RouterApiClient};
pub use executor::{RouterCommandExecutor, SimulatedExecutor};
pub use normalize::{
    TrafficCounters, aggregate_bandwidth, format_bytes, map_interface, memory_usage_percent,
};
pub use operations::{OperationResult, RouterOperations};
pub use resolver::{DnsLookup, HostResolver, ResolutionReport, ResolvedHost, SystemDnsLookup};
pub use types::{
    BackupInfo, Bandwidth, HotspotProfile, InterfaceInfo, InterfaceStatus, PppConnection,
    PublicIpEntry, RouterInfo, RouterStatus, Success,
};
