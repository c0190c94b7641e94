mod feed_port;
mod image_fetch_port;
mod location_port;

pub use feed_port::{FeedPage, FeedPort};
pub use image_fetch_port::ImageFetchPort;
pub use location_port::LocationPort;

#[cfg(test)]
pub mod mocks {
    pub use super::feed_port::mock::MockFeedPort;
    pub use super::image_fetch_port::mock::MockImageFetcher;
    pub use super::location_port::mock::MockLocation;
}
