use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::models::User;

/// Why a backend call did not produce what we asked for.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("error sending request: {0}")]
    Transport(String),
    #[error("backend did not answer within {0} ms")]
    Timeout(u64),
    #[error("backend rejected the credentials")]
    Unauthorized,
    #[error("unexpected status code: {0}")]
    Status(u16),
    #[error("error parsing response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Short label used for metrics and structured logs.
    pub fn label(&self) -> &'static str {
        match self {
            BackendError::Transport(_) => "transport",
            BackendError::Timeout(_) => "timeout",
            BackendError::Unauthorized => "unauthorized",
            BackendError::Status(_) => "status",
            BackendError::Decode(_) => "decode",
        }
    }
}

/// Answer to every login flavour: the bearer token plus the user fields
/// flattened next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

impl LoginResponse {
    /// Splits `{ token, ...user }` into its two halves.
    pub fn from_json(body: &str) -> Result<Self, BackendError> {
        let mut value: Value =
            serde_json::from_str(body).map_err(|e| BackendError::Decode(e.to_string()))?;
        let token = value
            .as_object_mut()
            .and_then(|map| map.remove("token"))
            .and_then(|token| token.as_str().map(str::to_string))
            .filter(|token| !token.is_empty())
            .ok_or_else(|| BackendError::Decode("login response has no token".to_string()))?;
        let user = serde_json::from_value(value).map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(LoginResponse { token, user })
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Exchanges a stored bearer token for the user it belongs to.
#[async_trait::async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify_token(&self, token: &str) -> Result<User, BackendError>;
}

/// Everything else the frontend asks of the backend.
#[async_trait::async_trait]
pub trait BackendApi: TokenVerifier {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, BackendError>;
    async fn sign_up(&self, request: &SignUpRequest) -> Result<LoginResponse, BackendError>;
    /// Trades a Google ID token for a Hubsite session.
    async fn google_login(&self, id_token: &str) -> Result<LoginResponse, BackendError>;
    async fn forgot_password(&self, email: &str) -> Result<(), BackendError>;
    async fn complete_onboarding(&self, token: &str) -> Result<(), BackendError>;
    async fn subscribe_newsletter(&self, email: &str) -> Result<(), BackendError>;
    async fn unsubscribe_newsletter(&self, email: &str) -> Result<(), BackendError>;
    /// Tells the backend a survey redirect landed.
    async fn record_survey_completion(
        &self,
        survey_id: &str,
        user_id: &str,
    ) -> Result<(), BackendError>;
}
