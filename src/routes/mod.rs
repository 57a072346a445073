//! HTTP route definitions and handlers.
//!
//! Pages go through the navigation gate; JSON actions under `/api` and the
//! operational endpoints do not. Every request passes the lowercase redirect
//! first.

mod auth_routes;
mod health_routes;
mod metrics_routes;
mod newsletter_routes;
mod onboarding_routes;
mod page_routes;

use axum::middleware::{from_fn, from_fn_with_state};
use axum::Router;

use crate::middleware::{gate_navigation, lowercase_redirect};
use crate::state::AppState;

/// Creates the application router with all configured routes.
pub fn create_router(state: AppState) -> Router {
    let pages = page_routes::routes().layer(from_fn_with_state(state.clone(), gate_navigation));

    Router::new()
        .merge(pages)
        .merge(auth_routes::routes())
        .merge(onboarding_routes::routes())
        .merge(newsletter_routes::routes())
        .merge(health_routes::routes())
        .merge(metrics_routes::routes())
        .layer(from_fn(lowercase_redirect))
        .with_state(state)
}
