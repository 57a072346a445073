use axum::extract::Query;
use http::Uri;
use serde::{Deserialize, Serialize};

pub const ONBOARDING_ROUTE: &str = "/onboarding";
pub const DASHBOARD_ROUTE: &str = "/dashboard";
pub const ADMIN_ROUTE: &str = "/admin";

/// Which auth modal the home page shows. Selected by `?modal=`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Modal {
    #[default]
    Login,
    SignUp,
    ForgotPassword,
}

impl Modal {
    /// Unknown values fall back to the login modal.
    pub fn parse(value: &str) -> Self {
        match value {
            "signUp" => Modal::SignUp,
            "forgotPassword" => Modal::ForgotPassword,
            _ => Modal::Login,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Modal::Login => "login",
            Modal::SignUp => "signUp",
            Modal::ForgotPassword => "forgotPassword",
        }
    }
}

/// Onboarding wizard step. Selected by `?stage=`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum OnboardingStage {
    #[default]
    GetStarted,
    Questions,
}

impl OnboardingStage {
    pub fn parse(value: &str) -> Self {
        match value {
            "questions" => OnboardingStage::Questions,
            _ => OnboardingStage::GetStarted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OnboardingStage::GetStarted => "getStarted",
            OnboardingStage::Questions => "questions",
        }
    }
}

/// Whether a page can be seen without a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Member,
}

/// The route a browser is navigating to, derived from the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteIntent {
    pub path: String,
    pub modal: Modal,
    pub stage: OnboardingStage,
}

/// The query parameters the gate and the pages care about.
#[derive(Deserialize, Debug, Default)]
struct IntentQuery {
    modal: Option<String>,
    stage: Option<String>,
}

impl RouteIntent {
    /// Paths are taken as-is; trailing slashes are redirected away before
    /// routing.
    pub fn new(path: &str) -> Self {
        RouteIntent {
            path: path.to_string(),
            modal: Modal::default(),
            stage: OnboardingStage::default(),
        }
    }

    /// A query that does not decode falls back to the defaults.
    pub fn from_uri(uri: &Uri) -> Self {
        let mut intent = RouteIntent::new(uri.path());
        let query = Query::<IntentQuery>::try_from_uri(uri)
            .map(|Query(query)| query)
            .unwrap_or_default();
        if let Some(modal) = query.modal.as_deref() {
            intent.modal = Modal::parse(modal);
        }
        if let Some(stage) = query.stage.as_deref() {
            intent.stage = OnboardingStage::parse(stage);
        }
        intent
    }

    pub fn is_admin(&self) -> bool {
        self.path == ADMIN_ROUTE || self.path.starts_with("/admin/")
    }

    pub fn is_onboarding(&self) -> bool {
        self.path == ONBOARDING_ROUTE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(uri: &'static str) -> RouteIntent {
        RouteIntent::from_uri(&Uri::from_static(uri))
    }

    #[test]
    fn modal_defaults_to_login() {
        assert_eq!(intent("/").modal, Modal::Login);
        assert_eq!(intent("/?modal=signUp").modal, Modal::SignUp);
        assert_eq!(intent("/?modal=forgotPassword").modal, Modal::ForgotPassword);
        assert_eq!(intent("/?modal=bogus").modal, Modal::Login);
    }

    #[test]
    fn stage_defaults_to_get_started() {
        assert_eq!(intent("/onboarding").stage, OnboardingStage::GetStarted);
        assert_eq!(
            intent("/onboarding?foo=1&stage=questions").stage,
            OnboardingStage::Questions
        );
    }

    #[test]
    fn admin_matching_is_prefix_based() {
        assert!(intent("/admin").is_admin());
        assert!(intent("/admin/users/1").is_admin());
        assert!(!intent("/administrator").is_admin());
    }

    #[test]
    fn query_values_are_percent_decoded() {
        assert_eq!(intent("/?modal=sign%55p").modal, Modal::SignUp);
        assert_eq!(
            intent("/onboarding?stage=question%73").stage,
            OnboardingStage::Questions
        );
    }

    #[test]
    fn path_is_kept_verbatim() {
        assert_eq!(intent("/").path, "/");
        assert_eq!(intent("/onboarding/").path, "/onboarding/");
        assert!(!intent("/onboarding/").is_onboarding());
    }
}
