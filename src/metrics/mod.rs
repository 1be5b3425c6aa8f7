// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Prometheus metrics for router operations served over HTTP
//!
//! Recorded by the HTTP layer around each operation; the router core itself
//! never touches the registry.

mod labels;
mod registry;

/// Labels for operations and their outcomes
pub use labels::{Outcome, OutcomeLabels, OperationLabels};

/// Prometheus metrics registry
pub use registry::MetricsRegistry;
