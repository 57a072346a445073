use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Names of the browser-held credential keys and the public landing route.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct SessionConfig {
    #[serde(default = "default_token_key")]
    pub token_key: String,
    #[serde(default = "default_onboarding_key")]
    pub onboarding_key: String,
    /// Adds the `Secure` attribute to credential cookies.
    #[serde(default)]
    pub secure_cookies: bool,
    #[serde(default = "default_landing_route")]
    pub landing_route: String,
}

fn default_token_key() -> String {
    "token".to_string()
}

fn default_onboarding_key() -> String {
    "isOnboardingDone".to_string()
}

fn default_landing_route() -> String {
    "/".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            token_key: default_token_key(),
            onboarding_key: default_onboarding_key(),
            secure_cookies: false,
            landing_route: default_landing_route(),
        }
    }
}
