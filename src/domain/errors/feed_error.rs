//! Feed fetch error types.

use thiserror::Error;

/// Errors raised while fetching a feed page.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum FeedError {
    #[error("network error while fetching feed: {message}")]
    Network { message: String },

    #[error("feed API returned HTTP {status}")]
    Http { status: u16 },

    #[error("failed to decode feed response: {message}")]
    Decode { message: String },

    #[error("unexpected feed error: {message}")]
    Unexpected { message: String },
}

impl FeedError {
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

    /// Creates an unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether the error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
