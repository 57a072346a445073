use serde::{Deserialize, Serialize};

/// The member record owned by the backend. We only hold a copy for the
/// duration of one navigation.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_onboarding_done: bool,
}

impl User {
    pub fn new(id: impl Into<String>, email: Option<String>, is_onboarding_done: bool) -> Self {
        User {
            id: id.into(),
            email,
            first_name: None,
            last_name: None,
            is_onboarding_done,
        }
    }

    /// First name if we have one, then the email's local part, then the id.
    pub fn display_name(&self) -> String {
        if let Some(first) = self.first_name.as_deref().filter(|s| !s.trim().is_empty()) {
            return first.trim().to_string();
        }
        if let Some(email) = self.email.as_deref() {
            if let Some((local, _)) = email.split_once('@') {
                if !local.is_empty() {
                    return local.to_string();
                }
            }
        }
        self.id.clone()
    }
}
