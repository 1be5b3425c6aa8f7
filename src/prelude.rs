// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Prelude module for convenient imports
//!
//! ```rust
//! use mikrotik_hotspot::prelude::*;
//! ```

// Core types
pub use crate::config::{Config, ConnectionConfig, TenantRouterSettings};
pub use crate::error::{AppError, OperationError, Result, RouterError};

// Metrics types
pub use crate::metrics::{MetricsRegistry, OperationLabels, Outcome, OutcomeLabels};

// MikroTik client
pub use crate::mikrotik::{
    DnsLookup, HostResolver, OperationResult, RouterApiClient, RouterCommandExecutor,
    RouterOperations, SimulatedExecutor, Success, SystemDnsLookup,
};
