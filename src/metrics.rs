// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for the hosts file webhook.
//!
//! All metrics use the namespace prefix `hostsfile_webhook_`.
//!
//! # Metrics Categories
//!
//! - **Operation Metrics** - Count and time the four provider operations
//! - **Backend Metrics** - Count failed reads and writes per storage medium
//! - **Change Metrics** - Count change entries skipped by the applier
//! - **State Metrics** - Number of hostnames currently managed
//!
//! # Example
//!
//! ```rust,no_run
//! use hostsfile_webhook::metrics::record_operation;
//!
//! record_operation("records", std::time::Duration::from_millis(3));
//! ```

use prometheus::{
    CounterVec, Encoder, HistogramOpts, HistogramVec, IntCounter, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::LazyLock;
use std::time::Duration;

/// Namespace prefix for all metrics (prometheus-safe)
const METRICS_NAMESPACE: &str = "hostsfile_webhook";

/// Global Prometheus metrics registry
///
/// All metrics are registered in this registry and exposed via `/metrics` endpoint.
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Total number of provider operations
///
/// Labels:
/// - `operation`: `records`, `apply_changes`, `adjust_endpoints`, `negotiate`
pub static OPERATIONS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_operations_total"),
        "Total number of provider operations by operation",
    );
    let counter = CounterVec::new(opts, &["operation"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Duration of provider operations in seconds, lock wait included
pub static OPERATION_DURATION_SECONDS: LazyLock<HistogramVec> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_operation_duration_seconds"),
        "Duration of provider operations in seconds by operation",
    )
    .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 30.0]);
    let histogram = HistogramVec::new(opts, &["operation"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .unwrap();
    histogram
});

/// Total number of failed backend calls
///
/// Labels:
/// - `backend`: `file` or `configmap`
/// - `direction`: `read` or `write`
pub static BACKEND_FAILURES_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_backend_failures_total"),
        "Total number of failed backend reads and writes",
    );
    let counter = CounterVec::new(opts, &["backend", "direction"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Total number of change entries skipped by the applier
///
/// Labels:
/// - `reason`: `no_targets` or `unsupported_type`
pub static SKIPPED_CHANGES_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_skipped_changes_total"),
        "Total number of change entries skipped by reason",
    );
    let counter = CounterVec::new(opts, &["reason"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Total number of hosts file lines skipped as malformed
pub static MALFORMED_LINES_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    let counter = IntCounter::new(
        format!("{METRICS_NAMESPACE}_malformed_lines_total"),
        "Total number of hosts file lines skipped as malformed",
    )
    .unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Hostnames in the mapping after the last reload or flush
pub static MANAGED_HOSTS: LazyLock<IntGauge> = LazyLock::new(|| {
    let gauge = IntGauge::new(
        format!("{METRICS_NAMESPACE}_managed_hosts"),
        "Number of hostnames in the mapping after the last reload or flush",
    )
    .unwrap();
    METRICS_REGISTRY
        .register(Box::new(gauge.clone()))
        .unwrap();
    gauge
});

/// Record a completed provider operation
pub fn record_operation(operation: &str, duration: Duration) {
    OPERATIONS_TOTAL.with_label_values(&[operation]).inc();
    OPERATION_DURATION_SECONDS
        .with_label_values(&[operation])
        .observe(duration.as_secs_f64());
}

/// Record a failed backend read or write
pub fn record_backend_failure(backend: &str, direction: &str) {
    BACKEND_FAILURES_TOTAL
        .with_label_values(&[backend, direction])
        .inc();
}

/// Record a change entry the applier refused
pub fn record_skipped_change(reason: &str) {
    SKIPPED_CHANGES_TOTAL.with_label_values(&[reason]).inc();
}

pub fn record_malformed_lines(count: usize) {
    MALFORMED_LINES_TOTAL.inc_by(count as u64);
}

pub fn set_managed_hosts(count: usize) {
    MANAGED_HOSTS.set(i64::try_from(count).unwrap_or(i64::MAX));
}

/// Gather and encode all metrics in Prometheus text format
///
/// # Errors
/// Returns error if encoding fails
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(format!("UTF-8 error: {e}")))
}
