//! Shared application state.
//!
//! Contains the state that is shared across all request handlers: the
//! configuration, the Gatekeeper and the backend client.

use std::sync::Arc;

use crate::backend::BackendApi;
use crate::config::ConfigV1;
use crate::gatekeeper::Gatekeeper;
use crate::metrics::Metrics;

/// Application state shared across all HTTP handlers.
///
/// Nothing in here is mutated per request; per-navigation session state lives
/// in the request itself.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Route guard and sole writer of sessions and credentials.
    pub gatekeeper: Arc<Gatekeeper>,
    /// Backend client for calls outside the gate (newsletter, completions).
    pub backend: Arc<dyn BackendApi>,
    /// Prometheus metrics collector.
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(config: Arc<ConfigV1>, backend: Arc<dyn BackendApi>, metrics: Metrics) -> Self {
        let gatekeeper = Arc::new(Gatekeeper::new(
            backend.clone(),
            &config.session.landing_route,
            metrics.clone(),
        ));
        AppState {
            config,
            gatekeeper,
            backend,
            metrics,
        }
    }
}
