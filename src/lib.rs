//! Ideaboard - a terminal client for browsing paginated idea feeds.
//!
//! This crate renders a card grid over a JSON:API-style content endpoint,
//! with lazy image loading, a transform-service fallback chain, and
//! URL-style pagination state.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer coordinating domain logic for the UI.
pub mod application;
/// Domain layer containing entities, services, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "ideaboard";
