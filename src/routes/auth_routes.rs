//! Login, sign-up, Google sign-in, password reset and logout actions.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{routing::post, Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::backend::{BackendError, LoginResponse, SignUpRequest};
use crate::forms::{require, validate_email};
use crate::session::{CookieCredentials, SessionStore};
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

const GOOGLE_FAILURE: &str = "Google sign-in failed. Please try again.";

/// Registers authentication routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/signup", post(sign_up))
        .route("/api/auth/google", post(google))
        .route("/api/auth/forgot-password", post(forgot_password))
        .route("/api/auth/logout", post(logout))
}

#[derive(Deserialize)]
struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleRequest {
    #[serde(default)]
    id_token: String,
}

#[derive(Deserialize)]
struct ForgotPasswordRequest {
    #[serde(default)]
    email: String,
}

/// Stores the new credentials and tells the client where to go next.
fn signed_in(state: &AppState, headers: &HeaderMap, response: LoginResponse) -> Response {
    let mut credentials = CookieCredentials::from_headers(headers, &state.config.session);
    let mut session = SessionStore::new();
    let redirect = state
        .gatekeeper
        .sign_in(response, &mut credentials, &mut session);
    let mut response = Json(json!({ "redirect": redirect })).into_response();
    credentials.write_to(response.headers_mut());
    response
}

/// Maps a failed credential exchange to what the form shows.
fn login_error(call: &str, e: BackendError) -> HTTPError {
    match e {
        BackendError::Unauthorized => {
            HTTPError::new(StatusCode::UNAUTHORIZED, "Invalid email or password")
        }
        other => {
            warn!("{} failed: {}", call, other);
            HTTPError::upstream()
        }
    }
}

async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<LoginRequest>,
) -> Result<Response, HTTPError> {
    validate_email(&body.email)?;
    require("password", &body.password)?;

    let response = state
        .backend
        .login(body.email.trim(), &body.password)
        .await
        .map_err(|e| login_error("Login", e))?;
    Ok(signed_in(&state, &headers, response))
}

async fn sign_up(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(mut body): Json<SignUpRequest>,
) -> Result<Response, HTTPError> {
    body.email = body.email.trim().to_string();
    validate_email(&body.email)?;
    require("password", &body.password)?;

    let response = state
        .backend
        .sign_up(&body)
        .await
        .map_err(|e| login_error("Sign-up", e))?;
    Ok(signed_in(&state, &headers, response))
}

/// Exchanges the Google ID token from the OAuth callback. Any failure clears
/// the stored credentials and shows a message.
async fn google(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<GoogleRequest>,
) -> Response {
    let result = if body.id_token.trim().is_empty() {
        Err(BackendError::Unauthorized)
    } else {
        state.backend.google_login(body.id_token.trim()).await
    };

    match result {
        Ok(response) => signed_in(&state, &headers, response),
        Err(e) => {
            warn!(
                event_name = "auth.google.failed",
                event_domain = "auth",
                error = %e,
                "google sign-in failed"
            );
            let mut credentials = CookieCredentials::from_headers(&headers, &state.config.session);
            let mut session = SessionStore::new();
            state.gatekeeper.sign_out(&mut credentials, &mut session);
            let mut response =
                HTTPError::new(StatusCode::UNAUTHORIZED, GOOGLE_FAILURE).into_response();
            credentials.write_to(response.headers_mut());
            response
        }
    }
}

async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, HTTPError> {
    validate_email(&body.email)?;
    state
        .backend
        .forgot_password(body.email.trim())
        .await
        .map_err(|e| {
            warn!("Password reset request failed: {}", e);
            HTTPError::upstream()
        })?;
    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "message": "If that address has an account, a reset link is on its way." })),
    ))
}

async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let mut credentials = CookieCredentials::from_headers(&headers, &state.config.session);
    let mut session = SessionStore::new();
    state.gatekeeper.sign_out(&mut credentials, &mut session);
    let mut response =
        Json(json!({ "redirect": state.gatekeeper.landing_route() })).into_response();
    credentials.write_to(response.headers_mut());
    response
}
