//! Domain layer with core entities, services, and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Domain services.
pub mod services;

pub use entities::{ImageSlot, PageQuery, PageSize, Post, SlotStatus, SortOrder};
pub use errors::{FeedError, ImageError};
pub use ports::{FeedPage, FeedPort, ImageFetchPort, LocationPort};
pub use services::{Candidate, ChainConfig, FallbackChain, ImageResolver};
