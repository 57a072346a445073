use std::time::{Duration, Instant};

use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tokio::time::timeout;
use tracing::{debug, info};

use super::base::{BackendApi, BackendError, LoginResponse, SignUpRequest, TokenVerifier};
use crate::config::BackendConfig;
use crate::metrics::{Metrics, MetricsRecorder};
use crate::models::User;

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Deserialize)]
struct VerifyTokenResponse {
    user: User,
}

/// Talks to the Hubsite backend over HTTP. Every call carries the static API
/// key and is bounded by `timeout_in_ms`.
pub struct HttpBackend {
    config: BackendConfig,
    client: reqwest::Client,
    metrics: Metrics,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig, metrics: Metrics) -> Self {
        info!(
            "Creating backend client for '{}' (timeout {} ms)",
            config.uri, config.timeout_in_ms
        );
        Self {
            config: config.clone(),
            client: reqwest::Client::new(),
            metrics,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.uri.trim_end_matches('/'), path)
    }

    /// Sends the request and returns the body of a 2xx answer.
    async fn execute(&self, call: &'static str, request: RequestBuilder) -> Result<String, BackendError> {
        let request = request.header(API_KEY_HEADER, self.config.api_key.as_str());
        let timeout_duration = Duration::from_millis(self.config.timeout_in_ms);
        let started = Instant::now();

        let exchange = async {
            let response = request
                .send()
                .await
                .map_err(|e| BackendError::Transport(e.to_string()))?;
            let status = response.status();
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(BackendError::Unauthorized);
            }
            if !status.is_success() {
                return Err(BackendError::Status(status.as_u16()));
            }
            response
                .text()
                .await
                .map_err(|e| BackendError::Transport(format!("Error reading response body: {}", e)))
        };

        let result = match timeout(timeout_duration, exchange).await {
            Ok(result) => result,
            Err(_) => Err(BackendError::Timeout(self.config.timeout_in_ms)),
        };

        let elapsed = started.elapsed().as_secs_f64();
        self.metrics.record_backend_duration(call, elapsed);
        match &result {
            Ok(_) => {
                self.metrics.record_backend_call(call, "ok");
                debug!(
                    event_name = "backend.call.ok",
                    event_domain = "backend",
                    call,
                    duration_secs = elapsed,
                    "backend call succeeded"
                );
            }
            Err(e) => {
                self.metrics.record_backend_call(call, e.label());
                debug!(
                    event_name = "backend.call.failed",
                    event_domain = "backend",
                    call,
                    error = %e,
                    duration_secs = elapsed,
                    "backend call failed"
                );
            }
        }
        result
    }

    async fn post_login(
        &self,
        call: &'static str,
        path: &str,
        body: serde_json::Value,
    ) -> Result<LoginResponse, BackendError> {
        let body = self
            .execute(call, self.client.post(self.url(path)).json(&body))
            .await?;
        LoginResponse::from_json(&body)
    }
}

#[async_trait::async_trait]
impl TokenVerifier for HttpBackend {
    async fn verify_token(&self, token: &str) -> Result<User, BackendError> {
        let body = self
            .execute(
                "verify_token",
                self.client.get(self.url("/auth/verify-token")).bearer_auth(token),
            )
            .await?;
        let response: VerifyTokenResponse =
            serde_json::from_str(&body).map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(response.user)
    }
}

#[async_trait::async_trait]
impl BackendApi for HttpBackend {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, BackendError> {
        self.post_login(
            "login",
            "/auth/login",
            json!({ "email": email, "password": password }),
        )
        .await
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<LoginResponse, BackendError> {
        let body = serde_json::to_value(request).map_err(|e| BackendError::Decode(e.to_string()))?;
        self.post_login("sign_up", "/auth/signup", body).await
    }

    async fn google_login(&self, id_token: &str) -> Result<LoginResponse, BackendError> {
        self.post_login("google_login", "/auth/google", json!({ "idToken": id_token }))
            .await
    }

    async fn forgot_password(&self, email: &str) -> Result<(), BackendError> {
        self.execute(
            "forgot_password",
            self.client
                .post(self.url("/auth/forgot-password"))
                .json(&json!({ "email": email })),
        )
        .await
        .map(|_| ())
    }

    async fn complete_onboarding(&self, token: &str) -> Result<(), BackendError> {
        self.execute(
            "complete_onboarding",
            self.client
                .post(self.url("/response/complete-onboarding"))
                .bearer_auth(token),
        )
        .await
        .map(|_| ())
    }

    async fn subscribe_newsletter(&self, email: &str) -> Result<(), BackendError> {
        self.execute(
            "subscribe_newsletter",
            self.client
                .post(self.url("/newsletter/create"))
                .json(&json!({ "email": email })),
        )
        .await
        .map(|_| ())
    }

    async fn unsubscribe_newsletter(&self, email: &str) -> Result<(), BackendError> {
        self.execute(
            "unsubscribe_newsletter",
            self.client
                .post(self.url("/newsletter/unsubscribe"))
                .json(&json!({ "email": email })),
        )
        .await
        .map(|_| ())
    }

    async fn record_survey_completion(
        &self,
        survey_id: &str,
        user_id: &str,
    ) -> Result<(), BackendError> {
        let path = format!("/live-survey/completions/{}/{}", survey_id, user_id);
        self.execute("survey_completion", self.client.get(self.url(&path)))
            .await
            .map(|_| ())
    }
}
