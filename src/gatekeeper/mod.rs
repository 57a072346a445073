//! Route guard run on every page navigation.

pub mod gatekeeper;

pub use gatekeeper::{Decision, GateState, Gatekeeper};
