mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_text, build_app, location, post_form, post_json, set_cookies, FakeBackend};
use hubsite::backend::{BackendError, LoginResponse};
use hubsite::models::User;
use serde_json::{json, Value};
use tower::ServiceExt;

fn login_response(token: &str, done: bool) -> LoginResponse {
    LoginResponse {
        token: token.to_string(),
        user: User::new("u1", Some("ada@example.com".to_string()), done),
    }
}

async fn json_body(response: axum::http::Response<axum::body::Body>) -> Value {
    serde_json::from_str(&body_text(response).await).expect("body should be JSON")
}

#[tokio::test]
async fn test_login_stores_credentials_and_routes_new_member_to_onboarding() {
    let mut backend = FakeBackend::default();
    backend.accounts.insert(
        "ada@example.com".to_string(),
        ("secret".to_string(), login_response("tok", false)),
    );
    let app = build_app(Arc::new(backend));

    let response = app
        .oneshot(post_json(
            "/api/auth/login",
            json!({ "email": " ada@example.com ", "password": "secret" }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("token=tok;")));
    assert!(cookies.iter().any(|c| c.starts_with("isOnboardingDone=false;")));
    assert_eq!(json_body(response).await["redirect"], "/onboarding");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let mut backend = FakeBackend::default();
    backend.accounts.insert(
        "ada@example.com".to_string(),
        ("secret".to_string(), login_response("tok", true)),
    );
    let app = build_app(Arc::new(backend));

    let response = app
        .oneshot(post_json(
            "/api/auth/login",
            json!({ "email": "ada@example.com", "password": "nope" }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn test_login_rejects_malformed_email_before_calling_backend() {
    let backend = Arc::new(FakeBackend::default());
    let app = build_app(backend.clone());

    let response = app
        .oneshot(post_json(
            "/api/auth/login",
            json!({ "email": "ada@example", "password": "secret" }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["field"], "email");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_sign_up_routes_to_onboarding() {
    let app = build_app(Arc::new(FakeBackend::default()));
    let response = app
        .oneshot(post_json(
            "/api/auth/signup",
            json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "password": "secret"
            }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response)
        .iter()
        .any(|c| c.starts_with("token=new-token;")));
    assert_eq!(json_body(response).await["redirect"], "/onboarding");
}

#[tokio::test]
async fn test_google_success_routes_complete_member_to_dashboard() {
    let mut backend = FakeBackend::default();
    backend
        .google
        .insert("google-id".to_string(), login_response("gtok", true));
    let app = build_app(Arc::new(backend));

    let response = app
        .oneshot(post_json(
            "/api/auth/google",
            json!({ "idToken": "google-id" }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response)
        .iter()
        .any(|c| c.starts_with("token=gtok;")));
    assert_eq!(json_body(response).await["redirect"], "/dashboard");
}

#[tokio::test]
async fn test_google_failure_clears_credentials_and_shows_message() {
    let app = build_app(Arc::new(FakeBackend::default()));
    let response = app
        .oneshot(post_json(
            "/api/auth/google",
            json!({ "idToken": "unknown" }),
            Some("token=old; isOnboardingDone=true"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let cookies = set_cookies(&response);
    assert!(cookies.iter().any(|c| c.starts_with("token=;")));
    assert!(cookies.iter().any(|c| c.starts_with("isOnboardingDone=;")));
    assert_eq!(
        json_body(response).await["error"],
        "Google sign-in failed. Please try again."
    );
}

#[tokio::test]
async fn test_logout_clears_credentials() {
    let app = build_app(Arc::new(FakeBackend::default()));
    let response = app
        .oneshot(post_json("/api/auth/logout", json!({}), Some("token=tok")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response)
        .iter()
        .any(|c| c.starts_with("token=;") && c.contains("Max-Age=0")));
    assert_eq!(json_body(response).await["redirect"], "/");
}

#[tokio::test]
async fn test_forgot_password_is_accepted() {
    let backend = Arc::new(FakeBackend::default());
    let app = build_app(backend.clone());
    let response = app
        .oneshot(post_json(
            "/api/auth/forgot-password",
            json!({ "email": "ada@example.com" }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(
        backend.calls(),
        vec!["forgot_password:ada@example.com".to_string()]
    );
}

#[tokio::test]
async fn test_onboarding_completion_writes_flag_after_backend_accepts() {
    let backend = Arc::new(FakeBackend::default());
    let app = build_app(backend.clone());
    let response = app
        .oneshot(post_json(
            "/api/onboarding/complete",
            json!({}),
            Some("token=tok; isOnboardingDone=false"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response)
        .iter()
        .any(|c| c.starts_with("isOnboardingDone=true;")));
    assert_eq!(json_body(response).await["redirect"], "/dashboard");
    assert_eq!(backend.calls(), vec!["complete_onboarding:tok".to_string()]);
}

#[tokio::test]
async fn test_onboarding_completion_failure_leaves_flag_alone() {
    let backend = FakeBackend {
        failure: Some(BackendError::Status(500)),
        ..FakeBackend::default()
    };
    let app = build_app(Arc::new(backend));
    let response = app
        .oneshot(post_json(
            "/api/onboarding/complete",
            json!({}),
            Some("token=tok; isOnboardingDone=false"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn test_onboarding_completion_without_token_is_unauthorized() {
    let app = build_app(Arc::new(FakeBackend::default()));
    let response = app
        .oneshot(post_json("/api/onboarding/complete", json!({}), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_newsletter_validates_then_subscribes() {
    let backend = Arc::new(FakeBackend::default());
    let app = build_app(backend.clone());

    let response = app
        .clone()
        .oneshot(post_json("/api/newsletter", json!({ "email": "nope" }), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(backend.calls().is_empty());

    let response = app
        .oneshot(post_json(
            "/api/newsletter",
            json!({ "email": "ada@example.com" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await["message"], "Thanks for subscribing!");
    assert_eq!(backend.calls(), vec!["subscribe:ada@example.com".to_string()]);
}

#[tokio::test]
async fn test_newsletter_backend_failure_is_bad_gateway() {
    let backend = FakeBackend {
        failure: Some(BackendError::Timeout(1000)),
        ..FakeBackend::default()
    };
    let app = build_app(Arc::new(backend));
    let response = app
        .oneshot(post_json(
            "/api/newsletter",
            json!({ "email": "ada@example.com" }),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_unsubscribe_wizard_walks_through_all_steps() {
    let backend = Arc::new(FakeBackend::default());
    let app = build_app(backend.clone());

    let response = app
        .clone()
        .oneshot(post_form(
            "/subscription",
            "step=1&email=ada%40example.com&action=unsubscribe",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("data-step=\"2\""));
    assert!(backend.calls().is_empty());

    let response = app
        .oneshot(post_form(
            "/subscription",
            "step=2&email=ada%40example.com&action=confirm",
        ))
        .await
        .unwrap();
    let body = body_text(response).await;
    assert!(body.contains("data-step=\"3\""));
    assert_eq!(backend.calls(), vec!["unsubscribe:ada@example.com".to_string()]);
}

#[tokio::test]
async fn test_unsubscribe_rejects_invalid_email_and_stays_on_first_step() {
    let app = build_app(Arc::new(FakeBackend::default()));
    let response = app
        .oneshot(post_form("/subscription", "step=1&email=broken&action=unsubscribe"))
        .await
        .unwrap();

    let body = body_text(response).await;
    assert!(body.contains("data-step=\"1\""));
    assert!(body.contains("valid email"));
}

#[tokio::test]
async fn test_unsubscribe_back_returns_to_first_step() {
    let app = build_app(Arc::new(FakeBackend::default()));
    let response = app
        .oneshot(post_form(
            "/subscription",
            "step=2&email=ada%40example.com&action=back",
        ))
        .await
        .unwrap();

    assert!(location(&response).is_none());
    let body = body_text(response).await;
    assert!(body.contains("data-step=\"1\""));
    assert!(!body.contains("ada@example.com"));
}

#[tokio::test]
async fn test_unsubscribe_confirm_with_forged_step_and_empty_email_is_rejected() {
    let backend = Arc::new(FakeBackend::default());
    let app = build_app(backend.clone());
    let response = app
        .oneshot(post_form("/subscription", "step=2&email=&action=confirm"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("data-step=\"1\""));
    assert!(!body.contains("data-step=\"3\""));
    assert!(body.contains("Email is required"));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_unsubscribe_confirm_failure_stays_on_step_two() {
    let backend = Arc::new(FakeBackend {
        failure: Some(BackendError::Status(500)),
        ..FakeBackend::default()
    });
    let app = build_app(backend.clone());
    let response = app
        .oneshot(post_form(
            "/subscription",
            "step=2&email=ada%40example.com&action=confirm",
        ))
        .await
        .unwrap();

    let body = body_text(response).await;
    assert!(body.contains("data-step=\"2\""));
    assert!(body.contains("Something went wrong. Please try again."));
    assert_eq!(backend.calls(), vec!["unsubscribe:ada@example.com".to_string()]);
}
