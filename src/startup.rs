//! Application startup and server initialization.
//!
//! Builds the backend client, the shared state and the router, then serves
//! until the process is stopped.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::backend::HttpBackend;
use crate::config::ConfigV1;
use crate::metrics::Metrics;
use crate::routes;
use crate::state::AppState;

/// Initializes and runs the application server.
///
/// # Errors
///
/// Returns an error if the server fails to bind to the configured address
/// or encounters a runtime error while serving.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Metrics::new();
    let backend = Arc::new(HttpBackend::new(&config.backend, metrics.clone()));
    let state = AppState::new(config.clone(), backend, metrics);

    let app = routes::create_router(state);

    info!("Starting server on {}", config.bind_address);
    let listener = TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
