use crate::gatekeeper::GateState;
use crate::models::{Modal, User};

/// The session for one navigation: the verified user (if any), where the
/// Gatekeeper left us, and which auth modal is open.
///
/// The Gatekeeper is the only writer. Views receive a clone through request
/// extensions and only read it.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    user: Option<User>,
    state: GateState,
    modal: Modal,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn clear_user(&mut self) {
        self.user = None;
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub(crate) fn mark_onboarding_done(&mut self) {
        if let Some(user) = self.user.as_mut() {
            user.is_onboarding_done = true;
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: GateState) {
        self.state = state;
    }

    pub fn modal(&self) -> Modal {
        self.modal
    }

    /// Switches the auth modal shown on the home page.
    pub fn open(&mut self, modal: Modal) {
        self.modal = modal;
    }
}
