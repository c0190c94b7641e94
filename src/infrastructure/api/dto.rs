use serde::Deserialize;

use crate::domain::entities::Post;
use crate::domain::ports::FeedPage;

/// JSON envelope returned by the ideas endpoint.
#[derive(Debug, Deserialize)]
pub struct FeedEnvelope {
    /// Posts for the requested page.
    #[serde(default)]
    pub data: Vec<Post>,
    /// Pagination metadata.
    #[serde(default)]
    pub meta: FeedMeta,
}

/// Pagination metadata block.
#[derive(Debug, Default, Deserialize)]
pub struct FeedMeta {
    /// Total posts across all pages.
    #[serde(default)]
    pub total: u64,
}

impl From<FeedEnvelope> for FeedPage {
    fn from(envelope: FeedEnvelope) -> Self {
        Self {
            posts: envelope.data,
            total: envelope.meta.total,
        }
    }
}
