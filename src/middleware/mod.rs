//! Request middleware: edge path normalisation and the navigation gate.

pub mod gate;
pub mod lowercase;

pub use gate::gate_navigation;
pub use lowercase::lowercase_redirect;
