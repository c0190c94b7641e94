//! Location port definition.
//!
//! Stands in for the browser address bar: pagination state is read from it
//! once at startup and written back after every completed fetch, so the
//! controller never touches ambient global state directly.

use crate::domain::entities::PageQuery;

/// Port mirroring the pagination query string.
pub trait LocationPort: Send + Sync {
    /// Returns the stored query string, if any.
    fn read(&self) -> Option<String>;

    /// Records the query of the last completed fetch.
    fn write(&self, query: &PageQuery);
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Mock location recording every write.
    #[derive(Default)]
    pub struct MockLocation {
        initial: Option<String>,
        pub writes: Mutex<Vec<String>>,
    }

    impl MockLocation {
        /// Creates a mock seeded with an initial query string.
        pub fn with_initial(query: impl Into<String>) -> Self {
            Self {
                initial: Some(query.into()),
                writes: Mutex::new(Vec::new()),
            }
        }

        /// Returns the most recent write.
        pub fn last_write(&self) -> Option<String> {
            self.writes.lock().unwrap().last().cloned()
        }
    }

    impl LocationPort for MockLocation {
        fn read(&self) -> Option<String> {
            self.initial.clone()
        }

        fn write(&self, query: &PageQuery) {
            self.writes.lock().unwrap().push(query.query_string());
        }
    }
}
