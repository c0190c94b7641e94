//! Image fetch port definition.

use async_trait::async_trait;

use crate::domain::errors::ImageError;

/// Port probing one image candidate URL.
///
/// Implementations bound each probe with a fixed timeout and decode the
/// bytes off-screen, so a success means the candidate is renderable.
#[async_trait]
pub trait ImageFetchPort: Send + Sync {
    /// Fetches and decodes one candidate.
    async fn fetch(&self, url: &str) -> Result<image::DynamicImage, ImageError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Mock fetcher that succeeds only for URLs containing a marker.
    pub struct MockImageFetcher {
        accept_containing: Option<String>,
        pub probed: Mutex<Vec<String>>,
    }

    impl MockImageFetcher {
        /// Creates a mock accepting URLs containing `marker`.
        pub fn accepting(marker: impl Into<String>) -> Self {
            Self {
                accept_containing: Some(marker.into()),
                probed: Mutex::new(Vec::new()),
            }
        }

        /// Creates a mock rejecting every URL.
        pub fn rejecting_all() -> Self {
            Self {
                accept_containing: None,
                probed: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ImageFetchPort for MockImageFetcher {
        async fn fetch(&self, url: &str) -> Result<image::DynamicImage, ImageError> {
            self.probed.lock().unwrap().push(url.to_string());
            match &self.accept_containing {
                Some(marker) if url.contains(marker.as_str()) => {
                    Ok(image::DynamicImage::new_rgb8(4, 3))
                }
                _ => Err(ImageError::http(403)),
            }
        }
    }
}
