//! Newsletter signup from the marketing footer.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{routing::post, Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::forms::validate_email;
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/newsletter", post(subscribe))
}

#[derive(Deserialize)]
struct NewsletterRequest {
    #[serde(default)]
    email: String,
}

async fn subscribe(
    State(state): State<AppState>,
    Json(body): Json<NewsletterRequest>,
) -> Result<impl IntoResponse, HTTPError> {
    let email = body.email.trim();
    validate_email(email)?;

    state.backend.subscribe_newsletter(email).await.map_err(|e| {
        warn!(
            event_name = "newsletter.subscribe.failed",
            event_domain = "newsletter",
            error = %e,
            "newsletter signup failed"
        );
        HTTPError::upstream()
    })?;

    info!("Newsletter signup accepted");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Thanks for subscribing!" })),
    ))
}
