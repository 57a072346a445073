//! Form handling shared by the HTML pages and the JSON actions.

pub mod unsubscribe;
pub mod validation;

pub use unsubscribe::{UnsubscribeAction, UnsubscribeStep};
pub use validation::{require, validate_email, FieldError};
