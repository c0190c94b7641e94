//! Configuration file loading.

use std::path::Path;

use tracing::{debug, warn};

use super::app_config::AppConfig;

/// Loads the configuration file, falling back to defaults when it is
/// missing or unparseable. CLI overrides are merged by the caller.
#[must_use]
pub fn load_config(path: Option<&Path>) -> AppConfig {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match AppConfig::default_config_path() {
            Some(path) => path,
            None => return AppConfig::default(),
        },
    };

    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(_) => {
            debug!(path = %path.display(), "No config file, using defaults");
            return AppConfig::default();
        }
    };

    match toml::from_str(&raw) {
        Ok(config) => {
            debug!(path = %path.display(), "Config loaded");
            config
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "Invalid config file, using defaults");
            AppConfig::default()
        }
    }
}
