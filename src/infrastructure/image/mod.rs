//! Image fetching and placeholder generation.

mod fetcher;
mod placeholder;

pub use fetcher::{HttpImageFetcher, PROBE_TIMEOUT};
pub use placeholder::{placeholder_image, PLACEHOLDER_HEIGHT, PLACEHOLDER_WIDTH};
