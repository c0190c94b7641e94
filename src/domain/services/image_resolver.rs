//! Best-candidate image resolution for a post.

use crate::domain::entities::Post;

/// Resolves a post's heterogeneous image fields to one absolute URL.
///
/// Field precedence is `small_image`, then `medium_image`, then the generic
/// `image`; the first field yielding a non-empty candidate wins permanently,
/// even if that URL later fails to load (the fallback chain handles that).
#[derive(Debug, Clone)]
pub struct ImageResolver {
    origin: String,
}

impl ImageResolver {
    /// Creates a resolver anchored at the API origin, used to absolutize
    /// relative paths.
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        let mut origin = origin.into();
        while origin.ends_with('/') {
            origin.pop();
        }
        Self { origin }
    }

    /// Returns the best candidate URL for the post, or None when no image
    /// field carries a usable value.
    #[must_use]
    pub fn resolve(&self, post: &Post) -> Option<String> {
        [&post.small_image, &post.medium_image, &post.image]
            .into_iter()
            .find_map(|field| field.first_url())
            .map(|url| self.absolutize(url))
    }

    fn absolutize(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        if url.starts_with('/') {
            format!("{}{url}", self.origin)
        } else {
            format!("{}/{url}", self.origin)
        }
    }
}
