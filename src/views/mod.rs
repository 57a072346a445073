//! Server-rendered pages. Markup only; styling and scripts live elsewhere.

pub mod html;
pub mod pages;

pub use html::{escape, render_page};
