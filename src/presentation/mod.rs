//! Presentation layer: terminal UI, widgets, and input handling.

/// Key-event classification.
pub mod events;
/// Screens and the orchestrator.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use ui::App;
