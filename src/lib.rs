//! Library exports for hubsite, shared between the binary and tests.

pub mod backend;
pub mod config;
pub mod forms;
pub mod gatekeeper;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod session;
pub mod sitemap;
pub mod startup;
pub mod state;
pub mod utils;
pub mod views;
