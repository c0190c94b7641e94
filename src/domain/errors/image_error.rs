//! Image candidate fetch error types.

use thiserror::Error;

/// Errors raised while probing one fallback candidate.
///
/// All of these are non-fatal to the card: a failed candidate advances the
/// chain, and the chain always terminates in the generated placeholder.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ImageError {
    #[error("candidate did not load within the probe timeout")]
    Timeout,

    #[error("network error while fetching image: {message}")]
    Network { message: String },

    #[error("image host returned HTTP {status}")]
    Http { status: u16 },

    #[error("failed to decode image bytes: {message}")]
    Decode { message: String },
}

impl ImageError {
    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a non-2xx status error.
    #[must_use]
    pub const fn http(status: u16) -> Self {
        Self::Http { status }
    }

    /// Creates a decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Returns whether the probe timed out.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}
