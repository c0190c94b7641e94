//! Domain services.

/// Fallback chain construction.
pub mod fallback_chain;
/// Post image resolution.
pub mod image_resolver;

pub use fallback_chain::{Candidate, ChainConfig, FallbackChain};
pub use image_resolver::ImageResolver;
