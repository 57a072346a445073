use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::forms::FieldError;

/// Shown whenever the backend fails and the user can retry.
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

/// A general purpose HTTP error type that can be converted into an `IntoResponse`.
#[derive(Debug)]
pub struct HTTPError {
    status: StatusCode,
    message: String,
    field: Option<&'static str>,
}

impl HTTPError {
    /// Creates a new HTTP error with the given status code and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        HTTPError {
            status,
            message: message.into(),
            field: None,
        }
    }

    /// The backend could not be reached or answered badly.
    pub fn upstream() -> Self {
        HTTPError::new(StatusCode::BAD_GATEWAY, GENERIC_ERROR)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Validation failures answer 422 and name the offending field.
impl From<FieldError> for HTTPError {
    fn from(e: FieldError) -> Self {
        HTTPError {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: e.message,
            field: Some(e.field),
        }
    }
}

/// Converts our `HTTPError` into a JSON response: `{"error": ..., "field": ...}`.
impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        let body = match self.field {
            Some(field) => json!({ "error": self.message, "field": field }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_become_unprocessable() {
        let error: HTTPError = FieldError::new("email", "Email is required").into();
        assert_eq!(error.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
