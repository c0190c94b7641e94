//! Application layer coordinating domain logic for the UI.

/// Fallback chain walking.
pub mod chain_loader;
/// Pagination control.
pub mod feed_controller;

pub use chain_loader::{ChainLoader, ChainOutcome, ImageLoadedEvent};
pub use feed_controller::{Applied, FeedController, PendingFetch};
