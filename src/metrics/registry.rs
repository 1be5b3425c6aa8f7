// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metrics registry and update logic

use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use super::labels::{OperationLabels, Outcome, OutcomeLabels};

#[derive(Clone)]
pub struct MetricsRegistry {
    registry: Arc<Mutex<Registry>>,
    operations: Family<OutcomeLabels, Counter>,
    operation_duration_milliseconds: Family<OperationLabels, Gauge>,
    operation_last_success_timestamp_seconds: Family<OperationLabels, Gauge>,
    tenants_configured: Gauge,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRegistry {
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let operations = Family::<OutcomeLabels, Counter>::default();
        registry.register(
            "mikrotik_operations",
            "Router operations served, by outcome",
            operations.clone(),
        );
        let operation_duration_milliseconds = Family::<OperationLabels, Gauge>::default();
        registry.register(
            "mikrotik_operation_duration_milliseconds",
            "Duration of the last call of each operation in milliseconds",
            operation_duration_milliseconds.clone(),
        );
        let operation_last_success_timestamp_seconds = Family::<OperationLabels, Gauge>::default();
        registry.register(
            "mikrotik_operation_last_success_timestamp_seconds",
            "Unix timestamp of the last successful call of each operation",
            operation_last_success_timestamp_seconds.clone(),
        );
        let tenants_configured = Gauge::default();
        registry.register(
            "mikrotik_tenants_configured",
            "Tenants with router settings loaded",
            tenants_configured.clone(),
        );

        Self {
            registry: Arc::new(Mutex::new(registry)),
            operations,
            operation_duration_milliseconds,
            operation_last_success_timestamp_seconds,
            tenants_configured,
        }
    }

    pub async fn encode_metrics(&self) -> Result<String, std::fmt::Error> {
        let registry = self.registry.lock().await;
        let mut buffer = String::new();
        encode(&mut buffer, &registry)?;
        Ok(buffer)
    }

    pub fn record_operation(&self, operation: &str, outcome: Outcome, duration: Duration) {
        self.operations
            .get_or_create(&OutcomeLabels {
                operation: operation.to_string(),
                outcome,
            })
            .inc();

        let labels = OperationLabels {
            operation: operation.to_string(),
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        self.operation_duration_milliseconds
            .get_or_create(&labels)
            .set(duration.as_millis() as i64);

        if outcome == Outcome::Success {
            let now = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs();
            #[allow(clippy::cast_possible_wrap)]
            self.operation_last_success_timestamp_seconds
                .get_or_create(&labels)
                .set(now as i64);
        }
    }

    /// Number of calls of `operation` that ended with `outcome`
    pub fn operation_count(&self, operation: &str, outcome: Outcome) -> u64 {
        self.operations
            .get_or_create(&OutcomeLabels {
                operation: operation.to_string(),
                outcome,
            })
            .get()
    }

    pub fn set_tenants_configured(&self, count: usize) {
        #[allow(clippy::cast_possible_wrap)]
        self.tenants_configured.set(count as i64);
    }
}
