// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for the otcdns webhook solver.
//!
//! All metrics carry the namespace prefix `otcdns_` and are registered in a
//! global registry exposed via the `/metrics` endpoint.
//!
//! # Example
//!
//! ```rust,no_run
//! use otcdns::metrics::record_challenge_success;
//!
//! record_challenge_success("present", std::time::Duration::from_secs(1));
//! ```

use prometheus::{CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::sync::LazyLock;
use std::time::Duration;

/// Namespace prefix for all solver metrics
const METRICS_NAMESPACE: &str = "otcdns";

/// Global Prometheus metrics registry
///
/// All metrics are registered in this registry and exposed via the
/// `/metrics` endpoint.
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Total number of challenge operations by operation and status
///
/// Labels:
/// - `operation`: `present` or `cleanup`
/// - `status`: Outcome (`success`, `error`)
pub static CHALLENGES_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_challenges_total"),
        "Total number of challenge operations by operation and status",
    );
    let counter = CounterVec::new(opts, &["operation", "status"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Duration of challenge operations in seconds
///
/// Labels:
/// - `operation`: `present` or `cleanup`
pub static CHALLENGE_DURATION_SECONDS: LazyLock<HistogramVec> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_challenge_duration_seconds"),
        "Duration of challenge operations in seconds by operation",
    )
    .buckets(vec![0.01, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0]);
    let histogram = HistogramVec::new(opts, &["operation"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .unwrap();
    histogram
});

/// Total number of challenge errors by operation and status reason
///
/// Labels:
/// - `operation`: `present` or `cleanup`
/// - `reason`: Status reason of the error (e.g. `ZoneNotFound`)
pub static CHALLENGE_ERRORS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_challenge_errors_total"),
        "Total number of challenge errors by operation and status reason",
    );
    let counter = CounterVec::new(opts, &["operation", "reason"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Record a successful challenge operation.
pub fn record_challenge_success(operation: &str, duration: Duration) {
    CHALLENGES_TOTAL
        .with_label_values(&[operation, "success"])
        .inc();
    CHALLENGE_DURATION_SECONDS
        .with_label_values(&[operation])
        .observe(duration.as_secs_f64());
}

/// Record a failed challenge operation.
pub fn record_challenge_error(operation: &str, reason: &str, duration: Duration) {
    CHALLENGES_TOTAL
        .with_label_values(&[operation, "error"])
        .inc();
    CHALLENGE_ERRORS_TOTAL
        .with_label_values(&[operation, reason])
        .inc();
    CHALLENGE_DURATION_SECONDS
        .with_label_values(&[operation])
        .observe(duration.as_secs_f64());
}

/// Encode all registered metrics in the Prometheus text format.
///
/// # Errors
///
/// Returns an error if encoding fails.
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).to_string())
}
