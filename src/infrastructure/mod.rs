//! Infrastructure layer containing adapters for external services.

/// Ideas API adapter.
pub mod api;
/// Configuration loading and CLI arguments.
pub mod config;
/// Image fetching and placeholder generation.
pub mod image;
/// Location port adapters.
pub mod location;

pub use api::IdeasApiClient;
pub use config::{load_config, AppConfig, CliArgs};
pub use image::HttpImageFetcher;
pub use location::{MemoryLocation, StateFileLocation};
