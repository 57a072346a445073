//! Page handlers. Each runs after the navigation gate and reads the session
//! it left in the request extensions.

use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::{routing::get, Extension, Form, Router};
use serde::Deserialize;
use tracing::{info, warn};

use crate::forms::{UnsubscribeAction, UnsubscribeStep};
use crate::models::RouteIntent;
use crate::session::SessionStore;
use crate::state::AppState;
use crate::utils::http_helpers::GENERIC_ERROR;
use crate::utils::log_throttle::should_emit;
use crate::views::{pages, render_page};

const COMPLETION_FAILURE_LOG_WINDOW: Duration = Duration::from_secs(60);

/// Registers every page route. The caller wraps them in the gate.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/features", get(features))
        .route("/faq", get(faq))
        .route("/works", get(works))
        .route("/termsofuse", get(terms_of_use))
        .route("/privacypolicy", get(privacy_policy))
        .route("/rewardpolicy", get(reward_policy))
        .route("/dashboard", get(dashboard))
        .route("/dashboard/spinner", get(spinner))
        .route("/surveys", get(surveys))
        .route("/onboarding", get(onboarding))
        .route("/subscription", get(subscription).post(subscription_action))
        .route("/standalone", get(standalone))
        .route("/standalone/screened-out", get(screened_out))
        .route("/standalone/quality-issue", get(quality_issue))
        .route("/standalone/target-reached", get(target_reached))
        .route("/standalone/{survey_id}/{user_id}", get(standalone_completion))
        .route("/admin", get(admin))
        .route("/admin/{*rest}", get(admin))
        .fallback(not_found)
}

type Intent = Extension<RouteIntent>;
type Session = Extension<SessionStore>;

async fn home(Extension(intent): Intent, Extension(session): Session) -> Html<String> {
    render_page(&intent.path, &session, &pages::home(&session))
}

async fn about(Extension(intent): Intent, Extension(session): Session) -> Html<String> {
    render_page(&intent.path, &session, &pages::about())
}

async fn features(Extension(intent): Intent, Extension(session): Session) -> Html<String> {
    render_page(&intent.path, &session, &pages::features())
}

async fn faq(Extension(intent): Intent, Extension(session): Session) -> Html<String> {
    render_page(&intent.path, &session, &pages::faq())
}

async fn works(Extension(intent): Intent, Extension(session): Session) -> Html<String> {
    render_page(&intent.path, &session, &pages::works())
}

async fn terms_of_use(Extension(intent): Intent, Extension(session): Session) -> Html<String> {
    render_page(&intent.path, &session, &pages::terms_of_use())
}

async fn privacy_policy(Extension(intent): Intent, Extension(session): Session) -> Html<String> {
    render_page(&intent.path, &session, &pages::privacy_policy())
}

async fn reward_policy(Extension(intent): Intent, Extension(session): Session) -> Html<String> {
    render_page(&intent.path, &session, &pages::reward_policy())
}

async fn dashboard(Extension(intent): Intent, Extension(session): Session) -> Html<String> {
    render_page(&intent.path, &session, &pages::dashboard(&session))
}

async fn spinner(Extension(intent): Intent, Extension(session): Session) -> Html<String> {
    render_page(&intent.path, &session, &pages::spinner())
}

async fn surveys(Extension(intent): Intent, Extension(session): Session) -> Html<String> {
    render_page(&intent.path, &session, &pages::surveys())
}

async fn onboarding(Extension(intent): Intent, Extension(session): Session) -> Html<String> {
    render_page(&intent.path, &session, &pages::onboarding(intent.stage))
}

async fn subscription(Extension(intent): Intent, Extension(session): Session) -> Html<String> {
    render_page(
        &intent.path,
        &session,
        &pages::subscription(&UnsubscribeStep::start()),
    )
}

/// One button press in the unsubscribe wizard. The current step travels in
/// hidden fields.
#[derive(Deserialize, Debug, Default)]
struct UnsubscribeForm {
    #[serde(default)]
    step: u8,
    #[serde(default)]
    email: String,
    #[serde(default)]
    action: String,
}

async fn subscription_action(
    State(state): State<AppState>,
    Extension(intent): Intent,
    Extension(session): Session,
    Form(form): Form<UnsubscribeForm>,
) -> Html<String> {
    let current = UnsubscribeStep::resume(form.step, &form.email);
    let next = match form.action.as_str() {
        "unsubscribe" => current.apply(UnsubscribeAction::Unsubscribe(form.email)),
        "back" => current.apply(UnsubscribeAction::GoBack),
        "confirm" if current.number() == 2 => {
            let email = current.email().to_string();
            match state.backend.unsubscribe_newsletter(&email).await {
                Ok(()) => {
                    info!("Newsletter unsubscribe confirmed");
                    current.apply(UnsubscribeAction::Confirm)
                }
                Err(e) => {
                    warn!("Newsletter unsubscribe failed: {}", e);
                    current.with_error(GENERIC_ERROR)
                }
            }
        }
        _ => current,
    };
    render_page(&intent.path, &session, &pages::subscription(&next))
}

async fn standalone(Extension(intent): Intent, Extension(session): Session) -> Html<String> {
    render_page(&intent.path, &session, &pages::standalone_success())
}

async fn screened_out(Extension(intent): Intent, Extension(session): Session) -> Html<String> {
    render_page(&intent.path, &session, &pages::screened_out())
}

async fn quality_issue(Extension(intent): Intent, Extension(session): Session) -> Html<String> {
    render_page(&intent.path, &session, &pages::quality_issue())
}

async fn target_reached(Extension(intent): Intent, Extension(session): Session) -> Html<String> {
    render_page(&intent.path, &session, &pages::target_reached())
}

/// Landing page for survey redirects. Tells the backend about the completion;
/// that ping is best-effort and never changes what the visitor sees.
async fn standalone_completion(
    State(state): State<AppState>,
    Path((survey_id, user_id)): Path<(String, String)>,
    Extension(intent): Intent,
    Extension(session): Session,
) -> Html<String> {
    if let Err(e) = state
        .backend
        .record_survey_completion(&survey_id, &user_id)
        .await
    {
        if let Some(suppressed_count) =
            should_emit("pages.standalone.completion.failed", COMPLETION_FAILURE_LOG_WINDOW)
        {
            warn!(
                event_name = "pages.standalone.completion.failed",
                event_domain = "pages",
                survey_id = survey_id.as_str(),
                error = %e,
                suppressed_count,
                "survey completion ping failed"
            );
        }
    }
    render_page(&intent.path, &session, &pages::standalone_success())
}

async fn admin(Extension(intent): Intent, Extension(session): Session) -> Html<String> {
    render_page(&intent.path, &session, &pages::admin())
}

async fn not_found(Extension(intent): Intent, Extension(session): Session) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        render_page(&intent.path, &session, &pages::not_found()),
    )
}
