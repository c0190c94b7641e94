//! Screens and the application orchestrator.

/// Event-loop owner.
pub mod app;
/// Card grid state.
pub mod feed_screen;

pub use app::App;
pub use feed_screen::{FeedScreenState, CARD_HEIGHT, CARD_WIDTH};
