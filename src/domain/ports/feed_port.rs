//! Feed fetch port definition.

use async_trait::async_trait;

use crate::domain::entities::{PageQuery, Post};
use crate::domain::errors::FeedError;

/// One fetched page of the ideas feed.
#[derive(Debug, Clone, Default)]
pub struct FeedPage {
    /// Posts in display order.
    pub posts: Vec<Post>,
    /// Total number of posts across all pages.
    pub total: u64,
}

/// Port for fetching feed pages.
#[async_trait]
pub trait FeedPort: Send + Sync {
    /// Fetches one page matching the query.
    async fn fetch_page(&self, query: &PageQuery) -> Result<FeedPage, FeedError>;
}
