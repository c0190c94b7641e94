//! Pagination controller.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{PageQuery, PageSize, SortOrder};
use crate::domain::errors::FeedError;
use crate::domain::ports::{FeedPage, FeedPort, LocationPort};
use crate::domain::Post;

/// A fetch the controller has committed to, to be executed by the caller.
///
/// Carries the generation used to discard stale responses: if a newer fetch
/// starts before this one completes, applying this one becomes a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingFetch {
    /// Parameters to fetch.
    pub query: PageQuery,
    /// Fetch generation.
    pub generation: u64,
}

/// Outcome of applying a fetch result.
#[derive(Debug, PartialEq, Eq)]
pub enum Applied {
    /// Response was stale and dropped; state unchanged.
    Stale,
    /// Posts and total replaced, location updated.
    Loaded,
    /// Fetch failed; posts and total cleared.
    Failed(String),
}

/// Drives pagination: validates parameter changes, clamps the page, hands
/// out fetches, and keeps the location port in sync with the last completed
/// fetch.
pub struct FeedController {
    location: Arc<dyn LocationPort>,
    query: PageQuery,
    posts: Vec<Post>,
    total: u64,
    loading: bool,
    generation: u64,
}

impl FeedController {
    /// Creates a controller seeded from the location port, falling back to
    /// defaults when nothing is stored.
    #[must_use]
    pub fn new(location: Arc<dyn LocationPort>) -> Self {
        let query = location
            .read()
            .map(|stored| PageQuery::parse_query(&stored))
            .unwrap_or_default();
        Self::with_query(location, query)
    }

    /// Creates a controller with an explicit initial query, bypassing the
    /// stored location (used for deep links passed on the command line).
    #[must_use]
    pub fn with_query(location: Arc<dyn LocationPort>, query: PageQuery) -> Self {
        Self {
            location,
            query,
            posts: Vec::new(),
            total: 0,
            loading: false,
            generation: 0,
        }
    }

    /// Returns the current query.
    #[must_use]
    pub const fn query(&self) -> PageQuery {
        self.query
    }

    /// Returns the posts of the last completed fetch.
    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Returns the total item count of the last completed fetch.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Returns true while a fetch is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the number of pages for the current total.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.query.total_pages(self.total)
    }

    /// Begins the initial fetch for the seeded query.
    pub fn begin_initial(&mut self) -> PendingFetch {
        self.begin_fetch(self.query)
    }

    /// Re-fetches the current query.
    pub fn refresh(&mut self) -> PendingFetch {
        self.begin_fetch(self.query)
    }

    /// Requests a page change. Out-of-range and no-op requests are rejected.
    pub fn request_page(&mut self, page: u32) -> Option<PendingFetch> {
        if page < 1 || page > self.total_pages() || page == self.query.page {
            debug!(page, total_pages = self.total_pages(), "Page change rejected");
            return None;
        }
        Some(self.begin_fetch(PageQuery {
            page,
            ..self.query
        }))
    }

    /// Requests a page-size change, clamping the page for the current total.
    pub fn request_size(&mut self, size: PageSize) -> PendingFetch {
        let next = PageQuery { size, ..self.query }.clamped(self.total);
        self.begin_fetch(next)
    }

    /// Requests a sort-order change, clamping the page for the current total.
    pub fn request_sort(&mut self, sort: SortOrder) -> PendingFetch {
        let next = PageQuery { sort, ..self.query }.clamped(self.total);
        self.begin_fetch(next)
    }

    fn begin_fetch(&mut self, query: PageQuery) -> PendingFetch {
        self.query = query;
        self.loading = true;
        self.generation += 1;
        debug!(generation = self.generation, query = %query.query_string(), "Fetch started");
        PendingFetch {
            query,
            generation: self.generation,
        }
    }

    /// Applies a completed fetch.
    ///
    /// Responses from superseded generations are dropped. On success the
    /// posts and total are replaced and the location port receives the
    /// fetched query; on failure both are cleared.
    pub fn apply_result(
        &mut self,
        generation: u64,
        result: Result<FeedPage, FeedError>,
    ) -> Applied {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "Dropping stale fetch response"
            );
            return Applied::Stale;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                self.posts = page.posts;
                self.total = page.total;
                self.location.write(&self.query);
                Applied::Loaded
            }
            Err(error) => {
                warn!(%error, "Feed fetch failed");
                self.posts.clear();
                self.total = 0;
                Applied::Failed(error.to_string())
            }
        }
    }

    /// Spawns `pending` against the feed port, reporting back through `send`.
    ///
    /// The controller itself stays synchronous; callers drive it from their
    /// event loop and feed the result back into [`Self::apply_result`].
    pub fn dispatch<F>(pending: PendingFetch, feed: Arc<dyn FeedPort>, send: F)
    where
        F: FnOnce(u64, Result<FeedPage, FeedError>) + Send + 'static,
    {
        tokio::spawn(async move {
            let result = feed.fetch_page(&pending.query).await;
            send(pending.generation, result);
        });
    }
}
