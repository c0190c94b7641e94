//! Ideas API adapter.

mod client;
mod dto;

pub use client::{IdeasApiClient, DEFAULT_BASE_URL};
pub use dto::{FeedEnvelope, FeedMeta};
