use std::collections::HashMap;

use http::HeaderMap;

use crate::config::SessionConfig;
use crate::utils::cookies::{append_set_cookie, parse_cookies, remove_cookie, set_cookie};

/// The browser-side key-value store holding the bearer token and the
/// onboarding flag.
pub trait CredentialStore: Send {
    fn token(&self) -> Option<String>;
    fn set_token(&mut self, token: &str);
    /// `None` when the flag was never written or holds something other than a boolean.
    fn onboarding_done(&self) -> Option<bool>;
    fn set_onboarding_done(&mut self, done: bool);
    /// Removes both keys.
    fn clear(&mut self);
}

/// In-memory credentials keyed like the browser store.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentials {
    token_key: String,
    onboarding_key: String,
    entries: HashMap<String, String>,
}

impl MemoryCredentials {
    pub fn new(config: &SessionConfig) -> Self {
        MemoryCredentials {
            token_key: config.token_key.clone(),
            onboarding_key: config.onboarding_key.clone(),
            entries: HashMap::new(),
        }
    }

    pub fn with_token(config: &SessionConfig, token: &str) -> Self {
        let mut credentials = Self::new(config);
        credentials.set_token(token);
        credentials
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl CredentialStore for MemoryCredentials {
    fn token(&self) -> Option<String> {
        self.entries.get(&self.token_key).cloned()
    }

    fn set_token(&mut self, token: &str) {
        self.entries.insert(self.token_key.clone(), token.to_string());
    }

    fn onboarding_done(&self) -> Option<bool> {
        self.entries
            .get(&self.onboarding_key)
            .and_then(|v| v.parse().ok())
    }

    fn set_onboarding_done(&mut self, done: bool) {
        self.entries
            .insert(self.onboarding_key.clone(), done.to_string());
    }

    fn clear(&mut self) {
        self.entries.remove(&self.token_key);
        self.entries.remove(&self.onboarding_key);
    }
}

/// Credentials carried as cookies. Reads come from the request; writes are
/// recorded and emitted as `Set-Cookie` headers on the response.
#[derive(Debug, Clone)]
pub struct CookieCredentials {
    store: MemoryCredentials,
    secure: bool,
    changes: Vec<(String, Option<String>)>,
}

impl CookieCredentials {
    pub fn empty(config: &SessionConfig) -> Self {
        CookieCredentials {
            store: MemoryCredentials::new(config),
            secure: config.secure_cookies,
            changes: Vec::new(),
        }
    }

    pub fn from_headers(headers: &HeaderMap, config: &SessionConfig) -> Self {
        let mut credentials = Self::empty(config);
        for (name, value) in parse_cookies(headers) {
            if (name == config.token_key || name == config.onboarding_key) && !value.is_empty() {
                credentials.store.entries.insert(name, value);
            }
        }
        credentials
    }

    /// Appends a `Set-Cookie` header for every key written or removed.
    pub fn write_to(&self, headers: &mut HeaderMap) {
        for (name, value) in &self.changes {
            let cookie = match value {
                Some(value) => set_cookie(name, value, self.secure),
                None => remove_cookie(name, self.secure),
            };
            append_set_cookie(headers, &cookie);
        }
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    fn record(&mut self, key: String, value: Option<String>) {
        self.changes.retain(|(name, _)| *name != key);
        self.changes.push((key, value));
    }
}

impl CredentialStore for CookieCredentials {
    fn token(&self) -> Option<String> {
        self.store.token()
    }

    fn set_token(&mut self, token: &str) {
        self.store.set_token(token);
        let key = self.store.token_key.clone();
        self.record(key, Some(token.to_string()));
    }

    fn onboarding_done(&self) -> Option<bool> {
        self.store.onboarding_done()
    }

    fn set_onboarding_done(&mut self, done: bool) {
        if self.store.onboarding_done() == Some(done) {
            return;
        }
        self.store.set_onboarding_done(done);
        let key = self.store.onboarding_key.clone();
        self.record(key, Some(done.to_string()));
    }

    fn clear(&mut self) {
        self.store.clear();
        let token_key = self.store.token_key.clone();
        let onboarding_key = self.store.onboarding_key.clone();
        self.record(token_key, None);
        self.record(onboarding_key, None);
    }
}
