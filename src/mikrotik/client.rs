// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! RouterOS REST API client
//!
//! One stateless HTTP request per call: resolve the host, send with Basic
//! auth, map every failure into [`RouterError`]. No retries, no sessions.

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;

use super::resolver::HostResolver;
use crate::config::ConnectionConfig;
use crate::error::{AppError, RouterError};

/// Connect phase bound, independent of the per-request timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_reqwest().as_str())
    }
}

/// HTTP client for the router's `/rest` endpoint
#[derive(Debug, Clone)]
pub struct RouterApiClient {
    http: reqwest::Client,
    resolver: HostResolver,
}

impl RouterApiClient {
    /// Creates a client that keeps no idle connections between calls
    pub fn new(resolver: HostResolver) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .pool_max_idle_per_host(0)
            .user_agent(concat!("mikrotik-hotspot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(http, resolver))
    }

    /// Creates a client around a pre-built `reqwest::Client`
    pub fn with_client(http: reqwest::Client, resolver: HostResolver) -> Self {
        Self { http, resolver }
    }

    pub fn resolver(&self) -> &HostResolver {
        &self.resolver
    }

    pub async fn get(&self, config: &ConnectionConfig, endpoint: &str) -> Result<Value, RouterError> {
        self.request(config, endpoint, HttpMethod::Get, None).await
    }

    /// Sends one request to `http://{host}:{http_port}/rest{endpoint}`
    ///
    /// Resolves `config.host` first; a host that fails to resolve is used as
    /// is. The whole exchange is bounded by `config.timeout`. An empty 2xx
    /// body yields `Value::Null`.
    pub async fn request(
        &self,
        config: &ConnectionConfig,
        endpoint: &str,
        method: HttpMethod,
        body: Option<&Value>,
    ) -> Result<Value, RouterError> {
        let resolved = self.resolver.resolve(&config.host).await;
        let url = rest_url(&resolved.resolved, &config.http_port, endpoint);
        let timeout_secs = config.timeout.as_secs();

        tracing::debug!("{} {}", method, url);

        let mut builder = self
            .http
            .request(method.as_reqwest(), &url)
            .timeout(config.timeout)
            .basic_auth(&config.username, Some(config.password.expose_secret()))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            let err = RouterError::from_reqwest(&e, &url, timeout_secs);
            tracing::error!("MikroTik API request failed: {}", err);
            err
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            let err = RouterError::from_reqwest(&e, &url, timeout_secs);
            tracing::error!("MikroTik API response read failed: {}", err);
            err
        })?;
        tracing::trace!("{} {} -> {} ({} bytes)", method, url, status, text.len());

        if !status.is_success() {
            let err = RouterError::status(status.as_u16(), &text);
            tracing::error!("MikroTik API request failed: {}", err);
            return Err(err);
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| RouterError::Decode(e.to_string()))
    }
}

/// Builds the REST URL, bracketing IPv6 literals
pub(crate) fn rest_url(host: &str, http_port: &str, endpoint: &str) -> String {
    let host = if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_string()
    };
    let port = http_port.trim();
    let endpoint = endpoint.trim_start_matches('/');
    if port.is_empty() {
        format!("http://{host}/rest/{endpoint}")
    } else {
        format!("http://{host}:{port}/rest/{endpoint}")
    }
}
