//! Record store adapter.
//!
//! Sits between the in-memory profile list and the key-value store. Nothing
//! here ever fails from the caller's point of view: unreadable data yields
//! the default list and failed writes are logged and dropped.

use tracing::{debug, warn};

use crate::config::DEFAULT_STORAGE_KEY;
use crate::profile::{default_profiles, Profile};
use crate::storage::KeyValueStore;

/// Persists the whole profile list under a single key.
#[derive(Debug)]
pub struct ProfileStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> ProfileStore<S> {
    /// Use the default `profiles` slot of `backend`.
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    /// Use a custom slot of `backend`.
    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// The slot name.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying key-value store.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Read the persisted list, or the default list if there is none.
    ///
    /// A missing slot, an empty value, malformed JSON and read errors all
    /// produce the default list. `[]` is a valid, empty list.
    pub fn load(&self) -> Vec<Profile> {
        let raw = match self.backend.get_item(&self.key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => {
                debug!("No saved profiles under '{}', using defaults", self.key);
                return default_profiles();
            }
            Err(e) => {
                warn!("Failed to read '{}': {}", self.key, e);
                return default_profiles();
            }
        };

        match serde_json::from_str::<Vec<Profile>>(&raw) {
            Ok(profiles) => {
                debug!("Loaded {} profile(s) from '{}'", profiles.len(), self.key);
                profiles
            }
            Err(e) => {
                warn!("Saved profiles under '{}' are malformed: {}", self.key, e);
                default_profiles()
            }
        }
    }

    /// Write the full list. Failures are logged and otherwise ignored.
    pub fn save(&self, profiles: &[Profile]) {
        let json = match serde_json::to_string(profiles) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize profiles: {}", e);
                return;
            }
        };

        match self.backend.set_item(&self.key, &json) {
            Ok(()) => debug!("Saved {} profile(s) to '{}'", profiles.len(), self.key),
            Err(e) => warn!("Failed to save profiles to '{}': {}", self.key, e),
        }
    }

    /// Remove the persisted list. Failures are logged and otherwise ignored.
    pub fn clear(&self) {
        match self.backend.remove_item(&self.key) {
            Ok(()) => debug!("Cleared '{}'", self.key),
            Err(e) => warn!("Failed to clear '{}': {}", self.key, e),
        }
    }
}
