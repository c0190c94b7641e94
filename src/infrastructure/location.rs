//! Location port adapters.
//!
//! The browser address bar has no terminal equivalent, so the canonical
//! query string lives in a small state file: read once at startup, written
//! after every completed fetch. Relaunching the client restores the last
//! viewed page.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::entities::PageQuery;
use crate::domain::ports::LocationPort;

const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "tecknian";
const APP_NAME: &str = "ideaboard";
const STATE_FILE_NAME: &str = "state.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct LocationState {
    #[serde(default)]
    query: Option<String>,
}

/// Location port persisting the query string to a state file.
pub struct StateFileLocation {
    path: PathBuf,
}

impl StateFileLocation {
    /// Creates a location backed by an explicit file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a location at the platform data directory, or None when no
    /// home directory can be determined.
    #[must_use]
    pub fn default_location() -> Option<Self> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| Self::new(dirs.data_dir().join(STATE_FILE_NAME)))
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LocationPort for StateFileLocation {
    fn read(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match toml::from_str::<LocationState>(&raw) {
            Ok(state) => state.query,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "Ignoring corrupt state file");
                None
            }
        }
    }

    fn write(&self, query: &PageQuery) {
        let state = LocationState {
            query: Some(query.query_string()),
        };
        let rendered = match toml::to_string(&state) {
            Ok(rendered) => rendered,
            Err(error) => {
                warn!(%error, "Failed to serialize location state");
                return;
            }
        };

        if let Some(parent) = self.path.parent()
            && let Err(error) = std::fs::create_dir_all(parent)
        {
            warn!(path = %parent.display(), %error, "Failed to create state directory");
            return;
        }
        if let Err(error) = std::fs::write(&self.path, rendered) {
            warn!(path = %self.path.display(), %error, "Failed to write location state");
        } else {
            debug!(query = %query.query_string(), "Location state written");
        }
    }
}

/// In-memory location used when no data directory is available.
#[derive(Default)]
pub struct MemoryLocation {
    query: Mutex<Option<String>>,
}

impl LocationPort for MemoryLocation {
    fn read(&self) -> Option<String> {
        self.query.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }

    fn write(&self, query: &PageQuery) {
        *self
            .query
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(query.query_string());
    }
}
