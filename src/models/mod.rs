pub mod route;
pub mod user;

pub use route::{Access, Modal, OnboardingStage, RouteIntent};
pub use user::User;
