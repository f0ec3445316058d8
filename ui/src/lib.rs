//! Shared UI crate for FingerFit. Record projection, chart geometry and the
//! screens live here; the `web` and `desktop` crates only launch [`Shell`].

pub mod charts;
pub mod components;
pub mod core;
pub mod i18n;
pub mod loader;
pub mod stats;
pub mod views;

pub use views::Shell;

/// Shared theme, inlined by both launchers.
pub const THEME_CSS: &str = include_str!("../assets/theme/main.css");
