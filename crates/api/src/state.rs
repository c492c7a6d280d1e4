//! Application state shared across handlers.

use std::sync::Arc;

use crate::db::Storage;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and gives handlers access to
/// the storage backend chosen at startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    storage: Arc<dyn Storage>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { storage }),
        }
    }

    /// Get a reference to the storage backend.
    #[must_use]
    pub fn storage(&self) -> &dyn Storage {
        self.inner.storage.as_ref()
    }
}
