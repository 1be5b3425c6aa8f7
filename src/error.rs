// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Error types for the MikroTik hotspot integration
//!
//! Three layers, from the outside in:
//! - [`AppError`]: process-level failures (configuration, binding, serving)
//! - [`OperationError`]: the only error that crosses the router operation boundary
//! - [`RouterError`]: a single failed request against the RouterOS REST API

use thiserror::Error;

/// Maximum number of characters of a router response body kept in an error message
pub const MAX_ERROR_BODY_CHARS: usize = 512;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or IO error
    #[error("IO error")]
    Io(#[from] std::io::Error),

    /// HTTP client construction error
    #[error("HTTP client error: {0}")]
    Http(String),

    /// Address parsing error
    #[error("Address parse error")]
    AddrParse(#[from] std::net::AddrParseError),
}

/// Convenient alias for Result with application error
pub type Result<T> = std::result::Result<T, AppError>;

/// Failure of a single RouterOS REST API request
///
/// Every variant renders a non-empty message naming the cause. Messages never
/// contain credentials: authentication travels in a header, not in the URL.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The router did not answer within the configured timeout
    #[error("Request to {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    /// TCP connection could not be established (refused, unreachable, unresolved)
    #[error("Connection to {url} failed: {message}")]
    Connect { url: String, message: String },

    /// Any other transport failure while sending or reading
    #[error("Transport error: {0}")]
    Transport(String),

    /// Router answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Router answered 2xx with a body that is not JSON
    #[error("Invalid JSON from router: {0}")]
    Decode(String),
}

impl RouterError {
    /// Builds a [`RouterError::Status`] keeping at most [`MAX_ERROR_BODY_CHARS`] of the body
    pub fn status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            body: truncate_chars(body.trim(), MAX_ERROR_BODY_CHARS),
        }
    }

    /// Classifies a `reqwest` failure for the given URL
    pub(crate) fn from_reqwest(err: &reqwest::Error, url: &str, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else if err.is_connect() {
            Self::Connect {
                url: url.to_string(),
                message: root_cause(err),
            }
        } else {
            Self::Transport(root_cause(err))
        }
    }
}

/// Error returned by every router operation
///
/// The HTTP layer maps [`OperationError::NotConfigured`] to 400 and everything
/// else to 500, passing the message through unchanged.
#[derive(Debug, Error)]
pub enum OperationError {
    /// Host or username missing; no network I/O was attempted
    #[error("MikroTik credentials not configured")]
    NotConfigured,

    /// A load-bearing router request failed
    #[error("{operation}: {source}")]
    Request {
        operation: &'static str,
        #[source]
        source: RouterError,
    },
}

impl OperationError {
    pub(crate) fn request(operation: &'static str) -> impl FnOnce(RouterError) -> Self {
        move |source| Self::Request { operation, source }
    }

    /// Whether the failure is a local configuration problem rather than a router failure
    #[must_use]
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured)
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

/// Walks the source chain so hyper/io causes show up in the message
fn root_cause(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message = format!("{message}: {cause}");
        source = cause.source();
    }
    message
}
