#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, Response};
use axum::Router;
use figment::{
    providers::{Format, Yaml},
    Figment,
};
use hubsite::backend::{BackendApi, BackendError, LoginResponse, SignUpRequest, TokenVerifier};
use hubsite::config::{extract_config, ConfigV1};
use hubsite::metrics::Metrics;
use hubsite::models::User;
use hubsite::routes::create_router;
use hubsite::state::AppState;

pub const TEST_CONFIG: &str = r#"
version: "1.0.0"
bind_address: 127.0.0.1:8081
logging:
  level: "debug"
  format: "json"
backend:
  uri: http://backend.invalid
  api_key: test-key
  timeout_in_ms: 1000
session:
  token_key: token
  onboarding_key: isOnboardingDone
"#;

pub fn load_test_config() -> ConfigV1 {
    extract_config(&Figment::new().merge(Yaml::string(TEST_CONFIG)))
        .expect("Failed to parse test config YAML")
}

/// In-process stand-in for the Hubsite backend.
#[derive(Default)]
pub struct FakeBackend {
    /// token -> user returned by verify-token.
    pub sessions: HashMap<String, User>,
    /// email -> (password, login response).
    pub accounts: HashMap<String, (String, LoginResponse)>,
    /// Google ID token -> login response.
    pub google: HashMap<String, LoginResponse>,
    /// When set, every non-verify call fails with this error.
    pub failure: Option<BackendError>,
    /// Names and arguments of calls made, in order.
    pub calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn with_session(token: &str, user: User) -> Self {
        let mut backend = FakeBackend::default();
        backend.sessions.insert(token.to_string(), user);
        backend
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl TokenVerifier for FakeBackend {
    async fn verify_token(&self, token: &str) -> Result<User, BackendError> {
        self.calls.lock().unwrap().push(format!("verify:{}", token));
        self.sessions
            .get(token)
            .cloned()
            .ok_or(BackendError::Unauthorized)
    }
}

#[async_trait::async_trait]
impl BackendApi for FakeBackend {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, BackendError> {
        self.record(format!("login:{}", email))?;
        match self.accounts.get(email) {
            Some((expected, response)) if expected == password => Ok(response.clone()),
            _ => Err(BackendError::Unauthorized),
        }
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<LoginResponse, BackendError> {
        self.record(format!("sign_up:{}", request.email))?;
        Ok(LoginResponse {
            token: "new-token".to_string(),
            user: User::new("new-user", Some(request.email.clone()), false),
        })
    }

    async fn google_login(&self, id_token: &str) -> Result<LoginResponse, BackendError> {
        self.record(format!("google:{}", id_token))?;
        self.google
            .get(id_token)
            .cloned()
            .ok_or(BackendError::Unauthorized)
    }

    async fn forgot_password(&self, email: &str) -> Result<(), BackendError> {
        self.record(format!("forgot_password:{}", email))
    }

    async fn complete_onboarding(&self, token: &str) -> Result<(), BackendError> {
        self.record(format!("complete_onboarding:{}", token))
    }

    async fn subscribe_newsletter(&self, email: &str) -> Result<(), BackendError> {
        self.record(format!("subscribe:{}", email))
    }

    async fn unsubscribe_newsletter(&self, email: &str) -> Result<(), BackendError> {
        self.record(format!("unsubscribe:{}", email))
    }

    async fn record_survey_completion(
        &self,
        survey_id: &str,
        user_id: &str,
    ) -> Result<(), BackendError> {
        self.record(format!("completion:{}/{}", survey_id, user_id))
    }
}

pub fn build_app(backend: Arc<FakeBackend>) -> Router {
    let config = Arc::new(load_test_config());
    let state = AppState::new(config, backend, Metrics::new());
    create_router(state)
}

pub fn get(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub fn post_json(path: &str, body: serde_json::Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn post_form(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().expect("location is ASCII").to_string())
}

pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().expect("cookie is ASCII").to_string())
        .collect()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}
