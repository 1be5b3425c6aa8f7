// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Configuration module for the MikroTik hotspot service
//!
//! Loads the server settings and the per-tenant router settings from
//! environment variables and JSON, and turns tenant settings into the
//! [`ConnectionConfig`] handed to every router operation.

use secrecy::SecretString;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[cfg(test)]
mod tests;

/// Default configuration values
pub mod defaults {
    pub const SERVER_ADDR: &str = "0.0.0.0:8080";
    pub const MIKROTIK_PORT: &str = "8728";
    pub const MIKROTIK_HTTP_PORT: &str = "80";
    pub const MIKROTIK_USERNAME: &str = "admin";
    pub const MIKROTIK_PASSWORD: &str = "";
    pub const TIMEOUT_SECS: u64 = 10;
    pub const DEFAULT_TENANT: &str = "default";
}

/// Environment variable names used by the application
pub mod env_vars {
    pub const SERVER_ADDR: &str = "SERVER_ADDR";
    pub const TENANTS_CONFIG: &str = "TENANTS_CONFIG";
    pub const MIKROTIK_HOST: &str = "MIKROTIK_HOST";
    pub const MIKROTIK_PORT: &str = "MIKROTIK_PORT";
    pub const MIKROTIK_HTTP_PORT: &str = "MIKROTIK_HTTP_PORT";
    pub const MIKROTIK_USERNAME: &str = "MIKROTIK_USERNAME";
    pub const MIKROTIK_PASSWORD: &str = "MIKROTIK_PASSWORD";
    pub const MIKROTIK_TIMEOUT_SECONDS: &str = "MIKROTIK_TIMEOUT_SECONDS";
}

/// Router settings stored for one tenant, in the shape the dashboard saves them
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantRouterSettings {
    #[serde(default)]
    pub mikrotik_host: String,
    #[serde(default = "default_port")]
    pub mikrotik_port: String,
    #[serde(default)]
    pub mikrotik_username: String,
    #[serde(default = "empty_secret")]
    pub mikrotik_password: SecretString,
}

fn default_port() -> String {
    defaults::MIKROTIK_PORT.to_string()
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

/// Connection parameters for a single router call
///
/// Built fresh at the boundary and passed by reference into operations.
/// `port` is the binary API port and is only reported back to callers;
/// requests go to `http_port`.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: String,
    pub http_port: String,
    pub username: String,
    pub password: SecretString,
    pub timeout: Duration,
}

impl ConnectionConfig {
    /// Creates a config with the default HTTP port and timeout
    pub fn new(
        host: impl Into<String>,
        port: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            http_port: defaults::MIKROTIK_HTTP_PORT.to_string(),
            username: username.into(),
            password: SecretString::from(password.into()),
            timeout: Duration::from_secs(defaults::TIMEOUT_SECS),
        }
    }

    #[must_use]
    pub fn with_http_port(mut self, http_port: impl Into<String>) -> Self {
        self.http_port = http_port.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Host and username are both present
    pub fn is_configured(&self) -> bool {
        !self.host.trim().is_empty() && !self.username.trim().is_empty()
    }
}

/// Application-wide configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub http_port: String,
    pub timeout_secs: u64,
    pub tenants: HashMap<String, TenantRouterSettings>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_addr: defaults::SERVER_ADDR.to_string(),
            http_port: defaults::MIKROTIK_HTTP_PORT.to_string(),
            timeout_secs: defaults::TIMEOUT_SECS,
            tenants: HashMap::new(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let server_addr = std::env::var(env_vars::SERVER_ADDR)
            .unwrap_or_else(|_| defaults::SERVER_ADDR.to_string());

        let http_port = std::env::var(env_vars::MIKROTIK_HTTP_PORT)
            .unwrap_or_else(|_| defaults::MIKROTIK_HTTP_PORT.to_string());

        let timeout_secs = std::env::var(env_vars::MIKROTIK_TIMEOUT_SECONDS)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(defaults::TIMEOUT_SECS);

        let tenants = if let Ok(config_json) = std::env::var(env_vars::TENANTS_CONFIG) {
            parse_tenants(&config_json)
        } else {
            // Fallback: a single tenant from the MIKROTIK_* variables
            let host = std::env::var(env_vars::MIKROTIK_HOST).ok();
            if let Some(host) = host {
                let settings = TenantRouterSettings {
                    mikrotik_host: host,
                    mikrotik_port: std::env::var(env_vars::MIKROTIK_PORT)
                        .unwrap_or_else(|_| defaults::MIKROTIK_PORT.to_string()),
                    mikrotik_username: std::env::var(env_vars::MIKROTIK_USERNAME)
                        .unwrap_or_else(|_| defaults::MIKROTIK_USERNAME.to_string()),
                    mikrotik_password: SecretString::from(
                        std::env::var(env_vars::MIKROTIK_PASSWORD)
                            .unwrap_or_else(|_| defaults::MIKROTIK_PASSWORD.to_string()),
                    ),
                };
                HashMap::from([(defaults::DEFAULT_TENANT.to_string(), settings)])
            } else {
                tracing::warn!(
                    "No tenant router settings found. Every router endpoint will report 'not configured'."
                );
                HashMap::new()
            }
        };

        for (tenant, settings) in &tenants {
            if settings.mikrotik_host.trim().is_empty()
                || settings.mikrotik_username.trim().is_empty()
            {
                tracing::warn!("Tenant '{}' has incomplete MikroTik settings", tenant);
            }
        }

        Config {
            server_addr,
            http_port,
            timeout_secs,
            tenants,
        }
    }

    /// Connection parameters for a tenant, or `None` when the tenant has no
    /// usable router settings
    pub fn connection_for(&self, tenant_id: &str) -> Option<ConnectionConfig> {
        let settings = self.tenants.get(tenant_id)?;
        let config = ConnectionConfig {
            host: settings.mikrotik_host.trim().to_string(),
            port: settings.mikrotik_port.clone(),
            http_port: self.http_port.clone(),
            username: settings.mikrotik_username.clone(),
            password: settings.mikrotik_password.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        };
        config.is_configured().then_some(config)
    }
}

/// Parses the `TENANTS_CONFIG` JSON object; malformed input yields no tenants
pub(crate) fn parse_tenants(config_json: &str) -> HashMap<String, TenantRouterSettings> {
    serde_json::from_str(config_json).unwrap_or_else(|e| {
        tracing::warn!("Failed to parse TENANTS_CONFIG: {}. Using empty list.", e);
        HashMap::new()
    })
}
