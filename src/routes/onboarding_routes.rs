//! The onboarding-complete event.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{routing::post, Json, Router};
use serde_json::json;

use crate::backend::BackendError;
use crate::models::route::DASHBOARD_ROUTE;
use crate::session::{CookieCredentials, SessionStore};
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/onboarding/complete", post(complete_onboarding))
}

/// Marks onboarding done on the backend, then locally. If the backend refuses,
/// nothing is written and the user stays in onboarding.
async fn complete_onboarding(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, HTTPError> {
    let mut credentials = CookieCredentials::from_headers(&headers, &state.config.session);
    let mut session = SessionStore::new();

    match state
        .gatekeeper
        .complete_onboarding(&mut credentials, &mut session)
        .await
    {
        Ok(_) => {
            let mut response = Json(json!({ "redirect": DASHBOARD_ROUTE })).into_response();
            credentials.write_to(response.headers_mut());
            Ok(response)
        }
        Err(BackendError::Unauthorized) => Err(HTTPError::new(
            StatusCode::UNAUTHORIZED,
            "Please log in again",
        )),
        Err(_) => Err(HTTPError::upstream()),
    }
}
