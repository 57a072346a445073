//! The Hubsite backend API: token verification, logins, onboarding,
//! newsletter and survey-completion calls.

pub mod base;
pub mod client;

pub use base::{BackendApi, BackendError, LoginResponse, SignUpRequest, TokenVerifier};
pub use client::HttpBackend;
