//! Application configuration.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::infrastructure::api::DEFAULT_BASE_URL;

const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "tecknian";
const APP_NAME: &str = "ideaboard";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, file-backed with CLI overrides.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Initial query string override (deep link).
    #[serde(skip)]
    pub query: Option<String>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Content API origin.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Host whose images need proxying or transformation.
    #[serde(default = "default_asset_domain")]
    pub asset_domain: String,

    /// Proxy base substituted for the asset-domain origin, when available.
    #[serde(default)]
    pub image_proxy: Option<String>,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Show image previews on cards.
    #[serde(default = "default_true")]
    pub image_preview: bool,

    /// Feed title shown in the header.
    #[serde(default = "default_feed_title")]
    pub feed_title: String,

    /// Feed tagline shown under the title.
    #[serde(default = "default_feed_tagline")]
    pub feed_tagline: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            image_preview: true,
            feed_title: default_feed_title(),
            feed_tagline: default_feed_tagline(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_asset_domain() -> String {
    "assets.suitdev.com".to_string()
}

fn default_feed_title() -> String {
    "Ideas".to_string()
}

fn default_feed_tagline() -> String {
    "Where all our great things begin".to_string()
}

fn default_true() -> bool {
    true
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(base_url) = args.base_url {
            self.base_url = base_url;
        }
        if let Some(asset_domain) = args.asset_domain {
            self.asset_domain = asset_domain;
        }
        if let Some(image_proxy) = args.image_proxy {
            self.image_proxy = Some(image_proxy);
        }
        if let Some(query) = args.query {
            self.query = Some(query);
        }
        if args.no_images {
            self.ui.image_preview = false;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("ideaboard.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            query: None,
            log_level: LogLevel::Info,
            base_url: default_base_url(),
            asset_domain: default_asset_domain(),
            image_proxy: None,
            ui: UiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_file() {
        let toml_content = r#"
            base_url = "https://content.example.com"
            image_proxy = "http://localhost:5173/proxy-image"

            [ui]
            image_preview = false
            feed_title = "Notes"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.base_url, "https://content.example.com");
        assert_eq!(
            config.image_proxy.as_deref(),
            Some("http://localhost:5173/proxy-image")
        );
        assert!(!config.ui.image_preview);
        assert_eq!(config.ui.feed_title, "Notes");
        assert_eq!(config.asset_domain, "assets.suitdev.com");
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.image_proxy.is_none());
        assert!(config.ui.image_preview);
        assert_eq!(config.ui.feed_title, "Ideas");
    }
}
