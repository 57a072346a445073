//! Metrics collection and exposition for Prometheus.
//!
//! Gate decisions and backend call outcomes.

mod recorder;

pub use recorder::{Metrics, MetricsRecorder};
