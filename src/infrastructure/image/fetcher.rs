//! HTTP image candidate fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::trace;

use crate::domain::errors::ImageError;
use crate::domain::ports::ImageFetchPort;

/// Per-candidate probe timeout.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Images wider than this are downscaled after decode to keep terminal
/// rendering cheap.
const MAX_RENDER_WIDTH: u32 = 400;
const MAX_RENDER_HEIGHT: u32 = 300;

/// Fetches and decodes image candidates over HTTP.
pub struct HttpImageFetcher {
    client: Client,
}

impl HttpImageFetcher {
    /// Creates a fetcher with the fixed probe timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, ImageError> {
        let client = Client::builder()
            .timeout(PROBE_TIMEOUT)
            .build()
            .map_err(|e| ImageError::network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetchPort for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<image::DynamicImage, ImageError> {
        trace!(url, "Probing image candidate");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ImageError::Timeout
            } else {
                ImageError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::http(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ImageError::network(format!("failed to read body: {e}")))?;

        let decoded = tokio::task::spawn_blocking(move || {
            let img = image::load_from_memory(&bytes)
                .map_err(|e| ImageError::decode(e.to_string()))?;
            if img.width() > MAX_RENDER_WIDTH {
                Ok(img.resize(
                    MAX_RENDER_WIDTH,
                    MAX_RENDER_HEIGHT,
                    image::imageops::FilterType::Lanczos3,
                ))
            } else {
                Ok(img)
            }
        })
        .await
        .map_err(|e| ImageError::decode(format!("decode task panicked: {e}")))??;

        Ok(decoded)
    }
}
