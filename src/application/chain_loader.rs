//! Fallback chain walker.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, trace};

use crate::domain::ports::ImageFetchPort;
use crate::domain::services::{Candidate, ChainConfig, FallbackChain};

/// Result of one chain walk.
#[derive(Debug)]
pub enum ChainOutcome {
    /// A remote candidate loaded and was adopted.
    Adopted {
        /// The adopted candidate URL.
        url: String,
        /// The decoded image.
        image: Arc<image::DynamicImage>,
    },
    /// Every remote candidate failed; only the placeholder remains.
    Exhausted,
}

/// Message sent when a chain walk finishes.
#[derive(Debug)]
pub struct ImageLoadedEvent {
    /// Index of the card the walk belongs to.
    pub card: usize,
    /// What the walk produced.
    pub outcome: ChainOutcome,
}

/// Walks fallback chains as background tasks.
///
/// Each card's walk is independent: there is no shared cache and no
/// cross-card coordination, so identical URLs on different cards probe
/// separately.
pub struct ChainLoader {
    fetcher: Arc<dyn ImageFetchPort>,
    config: ChainConfig,
    event_tx: mpsc::UnboundedSender<ImageLoadedEvent>,
}

impl ChainLoader {
    /// Creates a loader reporting outcomes on `event_tx`.
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn ImageFetchPort>,
        config: ChainConfig,
        event_tx: mpsc::UnboundedSender<ImageLoadedEvent>,
    ) -> Self {
        Self {
            fetcher,
            config,
            event_tx,
        }
    }

    /// Spawns a walk for one card.
    ///
    /// `adopted` is the card's currently adopted source; an identical
    /// candidate is skipped to avoid a redundant reload.
    pub fn spawn_walk(&self, card: usize, source: Option<String>, adopted: Option<String>) {
        let chain = FallbackChain::build(&self.config, source.as_deref());
        let fetcher = self.fetcher.clone();
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            let total = chain.len();
            for (index, candidate) in chain.into_iter().enumerate() {
                match candidate {
                    Candidate::Remote(url) => {
                        if adopted.as_deref() == Some(url.as_str()) {
                            trace!(card, url, "Skipping already-adopted candidate");
                            continue;
                        }
                        trace!(card, url, attempt = index + 1, total, "Probing candidate");
                        match fetcher.fetch(&url).await {
                            Ok(decoded) => {
                                debug!(card, url, "Candidate adopted");
                                let event = ImageLoadedEvent {
                                    card,
                                    outcome: ChainOutcome::Adopted {
                                        url,
                                        image: Arc::new(decoded),
                                    },
                                };
                                if event_tx.send(event).is_err() {
                                    error!(card, "Image event channel closed");
                                }
                                return;
                            }
                            Err(cause) => {
                                debug!(card, url, %cause, "Candidate failed, advancing chain");
                            }
                        }
                    }
                    Candidate::Placeholder => {
                        debug!(card, "Chain exhausted, falling back to placeholder");
                        let event = ImageLoadedEvent {
                            card,
                            outcome: ChainOutcome::Exhausted,
                        };
                        if event_tx.send(event).is_err() {
                            error!(card, "Image event channel closed");
                        }
                        return;
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockImageFetcher;

    fn loader(
        fetcher: Arc<MockImageFetcher>,
    ) -> (ChainLoader, mpsc::UnboundedReceiver<ImageLoadedEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChainLoader::new(fetcher, ChainConfig::default(), tx), rx)
    }

    #[tokio::test]
    async fn test_first_working_candidate_is_adopted() {
        let fetcher = Arc::new(MockImageFetcher::accepting("wsrv.nl"));
        let (loader, mut rx) = loader(fetcher.clone());

        loader.spawn_walk(
            0,
            Some("https://assets.suitdev.com/storage/a.jpg".to_string()),
            None,
        );

        let event = rx.recv().await.expect("walk should report");
        assert_eq!(event.card, 0);
        match event.outcome {
            ChainOutcome::Adopted { url, .. } => assert!(url.starts_with("https://wsrv.nl/")),
            ChainOutcome::Exhausted => panic!("expected adoption"),
        }
        // weserv was probed and failed before wsrv succeeded.
        let probed = fetcher.probed.lock().unwrap();
        assert!(probed[0].starts_with("https://images.weserv.nl/"));
        assert!(probed[1].starts_with("https://wsrv.nl/"));
    }

    #[tokio::test]
    async fn test_all_candidates_failing_exhausts() {
        let fetcher = Arc::new(MockImageFetcher::rejecting_all());
        let (loader, mut rx) = loader(fetcher.clone());

        loader.spawn_walk(
            3,
            Some("https://assets.suitdev.com/storage/a.jpg".to_string()),
            None,
        );

        let event = rx.recv().await.expect("walk should report");
        assert_eq!(event.card, 3);
        assert!(matches!(event.outcome, ChainOutcome::Exhausted));
        // weserv, wsrv, original all probed; no proxy configured.
        assert_eq!(fetcher.probed.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_adopted_candidate_is_skipped() {
        let fetcher = Arc::new(MockImageFetcher::rejecting_all());
        let (loader, mut rx) = loader(fetcher.clone());
        let original = "https://elsewhere.example.com/pic.png".to_string();

        loader.spawn_walk(1, Some(original.clone()), Some(original));

        let event = rx.recv().await.expect("walk should report");
        assert!(matches!(event.outcome, ChainOutcome::Exhausted));
        assert!(fetcher.probed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_source_exhausts_without_probing() {
        let fetcher = Arc::new(MockImageFetcher::accepting("anything"));
        let (loader, mut rx) = loader(fetcher.clone());

        loader.spawn_walk(7, None, None);

        let event = rx.recv().await.expect("walk should report");
        assert!(matches!(event.outcome, ChainOutcome::Exhausted));
        assert!(fetcher.probed.lock().unwrap().is_empty());
    }
}
