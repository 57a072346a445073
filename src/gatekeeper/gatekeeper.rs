use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backend::{BackendApi, BackendError, LoginResponse};
use crate::metrics::{Metrics, MetricsRecorder};
use crate::models::route::{DASHBOARD_ROUTE, ONBOARDING_ROUTE};
use crate::models::{Access, RouteIntent, User};
use crate::session::{CredentialStore, SessionStore};
use crate::sitemap;

/// Where a navigation stands with respect to the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GateState {
    #[default]
    Unauthenticated,
    /// A credential exists and has not been checked yet.
    Verifying,
    AuthenticatedIncomplete,
    AuthenticatedComplete,
    /// Admin routes skip verification and every redirect.
    Admin,
}

impl GateState {
    /// `Verifying` if a credential is stored, otherwise `Unauthenticated`.
    pub fn initial(credentials: &dyn CredentialStore) -> Self {
        match credentials.token() {
            Some(token) if !token.is_empty() => GateState::Verifying,
            _ => GateState::Unauthenticated,
        }
    }

    pub fn for_user(user: &User) -> Self {
        if user.is_onboarding_done {
            GateState::AuthenticatedComplete
        } else {
            GateState::AuthenticatedIncomplete
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(
            self,
            GateState::AuthenticatedIncomplete | GateState::AuthenticatedComplete
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GateState::Unauthenticated => "unauthenticated",
            GateState::Verifying => "verifying",
            GateState::AuthenticatedIncomplete => "authenticated_incomplete",
            GateState::AuthenticatedComplete => "authenticated_complete",
            GateState::Admin => "admin",
        }
    }
}

/// What the router should do with a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Redirect(String),
}

impl Decision {
    fn label(&self) -> &'static str {
        match self {
            Decision::Proceed => "proceed",
            Decision::Redirect(_) => "redirect",
        }
    }
}

/// Decides, once per navigation, whether the requested route may render.
///
/// It is the only writer of the [`SessionStore`] and of the stored
/// credentials: it hydrates the session from the backend, deletes credentials
/// the backend rejects, and records login and onboarding events.
pub struct Gatekeeper {
    backend: Arc<dyn BackendApi>,
    landing_route: String,
    metrics: Metrics,
}

impl Gatekeeper {
    pub fn new(backend: Arc<dyn BackendApi>, landing_route: &str, metrics: Metrics) -> Self {
        Gatekeeper {
            backend,
            landing_route: landing_route.to_string(),
            metrics,
        }
    }

    pub fn landing_route(&self) -> &str {
        &self.landing_route
    }

    /// Evaluates one navigation. Returns at most one redirect, and every
    /// redirect target proceeds when evaluated in the resulting state.
    pub async fn navigate(
        &self,
        intent: &RouteIntent,
        credentials: &mut dyn CredentialStore,
        session: &mut SessionStore,
    ) -> Decision {
        let navigation_id = Uuid::new_v4();
        session.open(intent.modal);

        let (state, decision) = if intent.is_admin() {
            (GateState::Admin, Decision::Proceed)
        } else {
            match GateState::initial(credentials) {
                GateState::Verifying => match self.verify(credentials, session).await {
                    Ok(state) => (state, self.decide(state, intent)),
                    Err(_) => (GateState::Unauthenticated, self.to_landing(intent)),
                },
                state => {
                    session.clear_user();
                    (state, self.decide(state, intent))
                }
            }
        };
        session.set_state(state);

        self.metrics
            .record_gate_decision(state.as_str(), decision.label());
        info!(
            event_name = "gate.navigation",
            event_domain = "gate",
            navigation_id = %navigation_id,
            path = intent.path.as_str(),
            state = state.as_str(),
            decision = ?decision,
            "navigation evaluated"
        );
        decision
    }

    /// The redirect rule for a settled state. Pure; `navigate` uses it after
    /// verification and tests use it to check that targets are stable.
    pub fn decide(&self, state: GateState, intent: &RouteIntent) -> Decision {
        if intent.is_admin() {
            return Decision::Proceed;
        }
        match state {
            GateState::Admin => Decision::Proceed,
            GateState::Unauthenticated | GateState::Verifying => {
                match sitemap::access_for(&intent.path) {
                    Access::Member => Decision::Redirect(self.login_route()),
                    Access::Public => Decision::Proceed,
                }
            }
            GateState::AuthenticatedIncomplete => {
                if intent.is_onboarding() {
                    Decision::Proceed
                } else {
                    Decision::Redirect(ONBOARDING_ROUTE.to_string())
                }
            }
            GateState::AuthenticatedComplete => {
                if intent.is_onboarding() {
                    Decision::Redirect(DASHBOARD_ROUTE.to_string())
                } else {
                    Decision::Proceed
                }
            }
        }
    }

    /// Exchanges the stored token for a user. On any failure both credential
    /// keys and the session user are cleared; there is no retry.
    async fn verify(
        &self,
        credentials: &mut dyn CredentialStore,
        session: &mut SessionStore,
    ) -> Result<GateState, BackendError> {
        let token = credentials.token().unwrap_or_default();
        match self.backend.verify_token(&token).await {
            Ok(user) => {
                let state = GateState::for_user(&user);
                // The user record is authoritative; bring the local flag in line.
                credentials.set_onboarding_done(user.is_onboarding_done);
                debug!("Verified session for user '{}'", user.id);
                session.set_user(user);
                Ok(state)
            }
            Err(e) => {
                warn!(
                    event_name = "gate.verify.failed",
                    event_domain = "gate",
                    error = %e,
                    "token verification failed; clearing session"
                );
                credentials.clear();
                session.clear_user();
                Err(e)
            }
        }
    }

    fn to_landing(&self, intent: &RouteIntent) -> Decision {
        if intent.path == self.landing_route {
            Decision::Proceed
        } else {
            Decision::Redirect(self.landing_route.clone())
        }
    }

    fn login_route(&self) -> String {
        format!("{}?modal=login", self.landing_route)
    }

    /// Records a successful login (password, sign-up or Google) and returns
    /// the route the user should land on.
    pub fn sign_in(
        &self,
        response: LoginResponse,
        credentials: &mut dyn CredentialStore,
        session: &mut SessionStore,
    ) -> String {
        credentials.set_token(&response.token);
        credentials.set_onboarding_done(response.user.is_onboarding_done);
        let state = GateState::for_user(&response.user);
        info!("User '{}' signed in", response.user.id);
        session.set_user(response.user);
        session.set_state(state);
        match state {
            GateState::AuthenticatedIncomplete => ONBOARDING_ROUTE.to_string(),
            _ => DASHBOARD_ROUTE.to_string(),
        }
    }

    pub fn sign_out(&self, credentials: &mut dyn CredentialStore, session: &mut SessionStore) {
        credentials.clear();
        session.clear_user();
        session.set_state(GateState::Unauthenticated);
    }

    /// The onboarding-complete event. The local flag is written only after
    /// the backend accepts it, so local and remote state cannot diverge.
    pub async fn complete_onboarding(
        &self,
        credentials: &mut dyn CredentialStore,
        session: &mut SessionStore,
    ) -> Result<GateState, BackendError> {
        let token = credentials.token().ok_or(BackendError::Unauthorized)?;
        if let Err(e) = self.backend.complete_onboarding(&token).await {
            warn!(
                event_name = "gate.onboarding.failed",
                event_domain = "gate",
                error = %e,
                "backend did not accept onboarding completion"
            );
            return Err(e);
        }
        credentials.set_onboarding_done(true);
        session.mark_onboarding_done();
        session.set_state(GateState::AuthenticatedComplete);
        Ok(GateState::AuthenticatedComplete)
    }
}
