//! Entity definitions.

/// Lazy image slot state machine.
pub mod image_slot;
/// Pagination state and arithmetic.
pub mod page;
/// Idea post and its image fields.
pub mod post;

pub use image_slot::{ImageSlot, SlotStatus, RETRY_BACKOFF, RETRY_BUDGET};
pub use page::{PageQuery, PageSize, SortOrder};
pub use post::{ImageField, ImageRef, Post};
