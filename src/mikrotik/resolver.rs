// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Router host resolution
//!
//! Routers are configured either with an IP literal or with a (dynamic) DNS
//! name. Resolution is best effort: when a name does not resolve the original
//! string is returned and the connection attempt is left to fail downstream.

use async_trait::async_trait;
use serde::Serialize;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Upper bound for a single DNS lookup
pub const RESOLUTION_TIMEOUT: Duration = Duration::from_secs(3);

/// Forward DNS lookup
#[async_trait]
pub trait DnsLookup: Send + Sync {
    /// Returns every address the name resolves to, in resolver order
    async fn lookup(&self, host: &str) -> std::io::Result<Vec<IpAddr>>;
}

/// [`DnsLookup`] backed by the system resolver
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDnsLookup;

#[async_trait]
impl DnsLookup for SystemDnsLookup {
    async fn lookup(&self, host: &str) -> std::io::Result<Vec<IpAddr>> {
        let addrs = tokio::net::lookup_host((host, 0)).await?;
        Ok(addrs.map(|addr| addr.ip()).collect())
    }
}

/// Outcome of resolving a configured host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHost {
    pub original: String,
    /// IP literal to connect to, or `original` when resolution degraded
    pub resolved: String,
    pub is_literal_ip: bool,
    /// The name did not resolve and `resolved` is the unresolved input
    pub degraded: bool,
}

/// Result of the DDNS diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionReport {
    pub host: String,
    pub resolved_ip: Option<String>,
    pub is_ip: bool,
    pub is_domain: bool,
}

impl ResolutionReport {
    pub fn succeeded(&self) -> bool {
        self.resolved_ip.is_some()
    }

    pub fn message(&self) -> &'static str {
        match (self.is_ip, self.succeeded()) {
            (true, _) => "Host is already an IP address",
            (false, true) => "Domain resolved successfully",
            (false, false) => "Failed to resolve domain",
        }
    }
}

/// Resolves router hosts to connectable addresses
///
/// Holds no cache: every call hits the resolver again since DDNS records move.
#[derive(Clone)]
pub struct HostResolver {
    dns: Arc<dyn DnsLookup>,
    timeout: Duration,
}

impl Default for HostResolver {
    fn default() -> Self {
        Self::new(Arc::new(SystemDnsLookup))
    }
}

impl std::fmt::Debug for HostResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostResolver")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl HostResolver {
    pub fn new(dns: Arc<dyn DnsLookup>) -> Self {
        Self {
            dns,
            timeout: RESOLUTION_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolves `host`, never failing
    pub async fn resolve(&self, host: &str) -> ResolvedHost {
        if is_ip_literal(host) {
            return ResolvedHost {
                original: host.to_string(),
                resolved: host.to_string(),
                is_literal_ip: true,
                degraded: false,
            };
        }

        match self.lookup_first(host).await {
            Some(ip) => {
                tracing::info!("DDNS resolved: {} -> {}", host, ip);
                ResolvedHost {
                    original: host.to_string(),
                    resolved: ip,
                    is_literal_ip: false,
                    degraded: false,
                }
            }
            None => {
                tracing::warn!("DDNS resolution failed for: {}", host);
                ResolvedHost {
                    original: host.to_string(),
                    resolved: host.to_string(),
                    is_literal_ip: false,
                    degraded: true,
                }
            }
        }
    }

    /// Reports precisely what resolving `host` yields
    pub async fn test_resolution(&self, host: &str) -> ResolutionReport {
        if is_ip_literal(host) {
            return ResolutionReport {
                host: host.to_string(),
                resolved_ip: Some(host.to_string()),
                is_ip: true,
                is_domain: false,
            };
        }

        ResolutionReport {
            host: host.to_string(),
            resolved_ip: self.lookup_first(host).await,
            is_ip: false,
            is_domain: true,
        }
    }

    /// First IPv4 answer (A record), falling back to the first IPv6 one
    async fn lookup_first(&self, host: &str) -> Option<String> {
        let addrs = match timeout(self.timeout, self.dns.lookup(host)).await {
            Ok(Ok(addrs)) => addrs,
            Ok(Err(e)) => {
                tracing::debug!("DNS lookup for {} failed: {}", host, e);
                return None;
            }
            Err(_) => {
                tracing::debug!("DNS lookup for {} timed out after {:?}", host, self.timeout);
                return None;
            }
        };

        let ip = addrs
            .iter()
            .find(|ip| ip.is_ipv4())
            .or_else(|| addrs.first())?
            .to_string();

        // Some resolvers echo the input back when they cannot resolve it
        (ip != host).then_some(ip)
    }
}

/// IPv4 or IPv6 literal, with or without IPv6 brackets
pub fn is_ip_literal(host: &str) -> bool {
    let bare = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    bare.parse::<IpAddr>().is_ok()
}
