use super::validation::validate_email;

/// The three-screen unsubscribe flow. Linear, with one way back from the
/// confirmation screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsubscribeStep {
    /// Enter the address.
    Step1 { email: String, error: Option<String> },
    /// "Are you sure?"
    Step2 { email: String, error: Option<String> },
    /// Done. Terminal.
    Step3,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnsubscribeAction {
    /// "Unsubscribe" on step 1, with whatever is in the email field.
    Unsubscribe(String),
    /// "No, not yet" on step 2.
    GoBack,
    /// "Yes, unsubscribe" on step 2.
    Confirm,
}

impl Default for UnsubscribeStep {
    fn default() -> Self {
        UnsubscribeStep::start()
    }
}

impl UnsubscribeStep {
    pub fn start() -> Self {
        UnsubscribeStep::Step1 {
            email: String::new(),
            error: None,
        }
    }

    /// Rebuilds the step from the hidden form fields. Unknown step numbers
    /// start over. The fields are client-supplied, so step 2 is only
    /// reachable with an address that passes validation.
    pub fn resume(step: u8, email: &str) -> Self {
        let email = email.trim().to_string();
        match step {
            2 => match validate_email(&email) {
                Ok(()) => UnsubscribeStep::Step2 { email, error: None },
                Err(e) => UnsubscribeStep::Step1 {
                    email,
                    error: Some(e.message),
                },
            },
            3 => UnsubscribeStep::Step3,
            _ => UnsubscribeStep::Step1 { email, error: None },
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            UnsubscribeStep::Step1 { .. } => 1,
            UnsubscribeStep::Step2 { .. } => 2,
            UnsubscribeStep::Step3 => 3,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            UnsubscribeStep::Step1 { email, .. } | UnsubscribeStep::Step2 { email, .. } => email,
            UnsubscribeStep::Step3 => "",
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            UnsubscribeStep::Step1 { error, .. } | UnsubscribeStep::Step2 { error, .. } => {
                error.as_deref()
            }
            UnsubscribeStep::Step3 => None,
        }
    }

    /// Applies one button press. Actions that do not belong to the current
    /// step leave it unchanged.
    pub fn apply(self, action: UnsubscribeAction) -> Self {
        match (self, action) {
            (UnsubscribeStep::Step1 { .. }, UnsubscribeAction::Unsubscribe(email)) => {
                let email = email.trim().to_string();
                match validate_email(&email) {
                    Ok(()) => UnsubscribeStep::Step2 { email, error: None },
                    Err(e) => UnsubscribeStep::Step1 {
                        email,
                        error: Some(e.message),
                    },
                }
            }
            (UnsubscribeStep::Step2 { .. }, UnsubscribeAction::GoBack) => UnsubscribeStep::start(),
            (UnsubscribeStep::Step2 { .. }, UnsubscribeAction::Confirm) => UnsubscribeStep::Step3,
            (step, _) => step,
        }
    }

    /// The same step, carrying an error message (e.g. a failed confirmation).
    pub fn with_error(self, message: impl Into<String>) -> Self {
        match self {
            UnsubscribeStep::Step1 { email, .. } => UnsubscribeStep::Step1 {
                email,
                error: Some(message.into()),
            },
            UnsubscribeStep::Step2 { email, .. } => UnsubscribeStep::Step2 {
                email,
                error: Some(message.into()),
            },
            UnsubscribeStep::Step3 => UnsubscribeStep::Step3,
        }
    }
}
