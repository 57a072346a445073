//! Who is browsing, and the browser-held credentials that say so.

pub mod credentials;
pub mod store;

pub use credentials::{CookieCredentials, CredentialStore, MemoryCredentials};
pub use store::SessionStore;
