use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::gatekeeper::Decision;
use crate::models::RouteIntent;
use crate::session::{CookieCredentials, SessionStore};
use crate::state::AppState;

/// Runs the Gatekeeper for a page navigation. On `Proceed`, the resulting
/// [`SessionStore`] and [`RouteIntent`] are handed to the view through request
/// extensions. Credential changes become `Set-Cookie` headers either way.
pub async fn gate_navigation(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let intent = RouteIntent::from_uri(request.uri());
    let mut credentials = CookieCredentials::from_headers(request.headers(), &state.config.session);
    let mut session = SessionStore::new();

    let decision = state
        .gatekeeper
        .navigate(&intent, &mut credentials, &mut session)
        .await;

    let mut response = match decision {
        Decision::Redirect(target) => Redirect::to(&target).into_response(),
        Decision::Proceed => {
            request.extensions_mut().insert(session);
            request.extensions_mut().insert(intent);
            next.run(request).await
        }
    };
    credentials.write_to(response.headers_mut());
    response
}
