//! Ideas API HTTP client.

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, warn};

use super::dto::FeedEnvelope;
use crate::domain::entities::PageQuery;
use crate::domain::errors::FeedError;
use crate::domain::ports::{FeedPage, FeedPort};

/// Default content API origin.
pub const DEFAULT_BASE_URL: &str = "https://suitmedia-backend.suitdev.com";

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Feed client for the ideas endpoint.
pub struct IdeasApiClient {
    client: Client,
    base_url: String,
}

impl IdeasApiClient {
    /// Creates a client against the default origin.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, FeedError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom origin.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| FeedError::unexpected(format!("failed to create HTTP client: {e}")))?;

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Ok(Self { client, base_url })
    }

    /// Returns the API origin, used to absolutize relative image paths.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl FeedPort for IdeasApiClient {
    async fn fetch_page(&self, query: &PageQuery) -> Result<FeedPage, FeedError> {
        let url = format!("{}/api/ideas", self.base_url);

        debug!(query = %query.query_string(), "Fetching ideas page");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("page[number]", query.page.to_string()),
                ("page[size]", query.size.as_u32().to_string()),
                ("sort", query.sort.api_param().to_string()),
                ("append[]", "small_image".to_string()),
                ("append[]", "medium_image".to_string()),
            ])
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to reach ideas API");
                if e.is_timeout() {
                    FeedError::network("request timed out")
                } else if e.is_connect() {
                    FeedError::network("failed to connect to the ideas API")
                } else {
                    FeedError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::http(status.as_u16()));
        }

        let envelope: FeedEnvelope = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse ideas response");
            FeedError::decode(e.to_string())
        })?;

        debug!(
            posts = envelope.data.len(),
            total = envelope.meta.total,
            "Ideas page fetched"
        );

        Ok(envelope.into())
    }
}
