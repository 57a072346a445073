use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the Hubsite backend API lives and how we talk to it.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct BackendConfig {
    /// Base URI, e.g. "https://api.hubsitesocial.com".
    pub uri: String,
    /// Static key sent as `x-api-key` on every call.
    pub api_key: String,
    /// Upper bound for a single backend call.
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
}

fn default_timeout_in_ms() -> u64 {
    5000
}
