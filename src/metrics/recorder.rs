//! Metrics recording implementation using Prometheus.

use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use tracing::error;

/// Trait for recording application metrics.
pub trait MetricsRecorder: Clone + Send + Sync + 'static {
    /// Records where a navigation ended up and whether it was redirected.
    fn record_gate_decision(&self, state: &str, decision: &str);

    /// Records a backend call with its outcome ("ok", "error", "timeout").
    fn record_backend_call(&self, call: &str, result: &str);

    /// Records the duration of a backend call.
    fn record_backend_duration(&self, call: &str, duration_secs: f64);
}

/// Prometheus metrics collector.
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,

    gate_decisions_total: CounterVec,

    backend_calls_total: CounterVec,
    backend_duration_seconds: HistogramVec,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Creates a new metrics instance with its own Prometheus registry.
    pub fn new() -> Self {
        let registry = Arc::new(Registry::new());

        let gate_decisions_total = register_counter_vec_with_registry!(
            Opts::new(
                "hubsite_gate_decisions_total",
                "Page navigations by resulting session state and decision"
            ),
            &["state", "decision"],
            registry.clone()
        )
        .expect("Failed to register hubsite_gate_decisions_total");

        let backend_calls_total = register_counter_vec_with_registry!(
            Opts::new(
                "hubsite_backend_calls_total",
                "Calls made to the Hubsite backend API"
            ),
            &["call", "result"],
            registry.clone()
        )
        .expect("Failed to register hubsite_backend_calls_total");

        let backend_duration_seconds = register_histogram_vec_with_registry!(
            "hubsite_backend_duration_seconds",
            "Backend call duration in seconds",
            &["call"],
            vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
            registry.clone()
        )
        .expect("Failed to register hubsite_backend_duration_seconds");

        Metrics {
            registry,
            gate_decisions_total,
            backend_calls_total,
            backend_duration_seconds,
        }
    }

    /// Renders all metrics in Prometheus text format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            error!("Failed to encode metrics: {}", e);
            return String::new();
        }
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl MetricsRecorder for Metrics {
    fn record_gate_decision(&self, state: &str, decision: &str) {
        self.gate_decisions_total
            .with_label_values(&[state, decision])
            .inc();
    }

    fn record_backend_call(&self, call: &str, result: &str) {
        self.backend_calls_total
            .with_label_values(&[call, result])
            .inc();
    }

    fn record_backend_duration(&self, call: &str, duration_secs: f64) {
        self.backend_duration_seconds
            .with_label_values(&[call])
            .observe(duration_secs);
    }
}
