//! Durable, fail-open storage of the `Progress` record.
//!
//! The store keeps an in-memory view alongside the backend. When any backend
//! call fails the store flips to degraded mode for the rest of its lifetime:
//! reads and writes are served from the view and never reach the backend
//! again, so a half-working backend cannot hand back stale records.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use gop_core::clock::to_iso_millis;
use gop_core::error::StorageError;
use gop_core::storage::KeyValueStore;
use tracing::{debug, warn};

use crate::domain::progress::{Ending, Progress, ProgressPatch};

/// Prefix applied to every key this store touches.
pub const STORAGE_PREFIX: &str = "gop_";

/// Named sub-records persisted by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// The JSON-serialized `Progress` record.
    Progress,
    /// The chosen ending, written once at completion.
    EndingChosen,
    /// ISO-8601 completion time, written once at completion.
    CompletionTimestamp,
}

impl StorageKey {
    /// Un-prefixed key name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Progress => "progress",
            Self::EndingChosen => "ending_chosen",
            Self::CompletionTimestamp => "completion_timestamp",
        }
    }

    /// Key as written to the backend.
    #[must_use]
    pub fn namespaced(self) -> String {
        format!("{STORAGE_PREFIX}{}", self.name())
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The `Progress` persistence service injected into every section.
pub struct ProgressStore {
    backend: Arc<dyn KeyValueStore>,
    view: Progress,
    degraded: bool,
}

impl fmt::Debug for ProgressStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressStore")
            .field("view", &self.view)
            .field("degraded", &self.degraded)
            .finish_non_exhaustive()
    }
}

impl ProgressStore {
    /// Creates a store over `backend` and loads the current record.
    #[must_use]
    pub fn open(backend: Arc<dyn KeyValueStore>) -> Self {
        let mut store = Self {
            backend,
            view: Progress::default(),
            degraded: false,
        };
        store.load();
        store
    }

    /// Whether a backend failure has switched the store to in-memory mode.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// The in-memory view without touching the backend.
    #[must_use]
    pub fn current(&self) -> &Progress {
        &self.view
    }

    /// Returns the persisted record, or the default when none exists.
    ///
    /// In degraded mode the in-memory view is returned instead. A stored
    /// record that fails to parse is treated as absent.
    pub fn load(&mut self) -> Progress {
        if self.degraded {
            return self.view.clone();
        }

        let raw = match self.backend.get(&StorageKey::Progress.namespaced()) {
            Ok(raw) => raw,
            Err(e) => {
                self.degrade(StorageKey::Progress, &e);
                return self.view.clone();
            }
        };

        let mut progress = match raw {
            Some(json) => serde_json::from_str::<Progress>(&json).unwrap_or_else(|e| {
                warn!(key = %StorageKey::Progress, error = %e, "discarding unreadable progress record");
                Progress::default()
            }),
            None => Progress::default(),
        };

        if progress.ending_chosen.is_none() {
            self.fold_completion_keys(&mut progress);
        }

        self.view = progress;
        self.view.clone()
    }

    /// Merges `patch` over the current record and persists it.
    ///
    /// Returns `false` if the record could not be persisted; the patch is
    /// still applied to the in-memory view.
    pub fn save(&mut self, patch: ProgressPatch) -> bool {
        let merged = self.load().merged(patch);
        self.view = merged;
        self.persist_view()
    }

    /// Removes a named sub-record.
    ///
    /// Clearing `Progress` resets the view to the default record and drops
    /// the completion keys with it, so a later `load` cannot fold an old
    /// ending back in. Clearing one of the completion keys also clears the
    /// matching field of the record. Returns `false` if the backend could
    /// not be updated.
    pub fn clear(&mut self, key: StorageKey) -> bool {
        match key {
            StorageKey::Progress => {
                self.view = Progress::default();
                self.remove(StorageKey::EndingChosen)
                    && self.remove(StorageKey::CompletionTimestamp)
                    && self.remove(key)
            }
            StorageKey::EndingChosen => {
                self.view.ending_chosen = None;
                self.remove(key) && self.persist_view()
            }
            StorageKey::CompletionTimestamp => {
                self.view.completion_timestamp = None;
                self.remove(key) && self.persist_view()
            }
        }
    }

    /// Records the chosen ending in the record and in the two completion
    /// keys. Returns `false` if anything failed to persist.
    pub fn record_ending(&mut self, ending: Ending, at: DateTime<Utc>) -> bool {
        let saved = self.save(ProgressPatch::ending(ending, at));
        let ending_json = serde_json::Value::from(ending.as_str()).to_string();
        let at_json = serde_json::Value::from(to_iso_millis(at)).to_string();
        saved
            && self.write(StorageKey::EndingChosen, &ending_json)
            && self.write(StorageKey::CompletionTimestamp, &at_json)
    }

    /// Fills the ending fields from the standalone completion keys, which
    /// older pages wrote without touching the main record.
    fn fold_completion_keys(&mut self, progress: &mut Progress) {
        let ending = self
            .read_string(StorageKey::EndingChosen)
            .and_then(|name| name.parse::<Ending>().ok());
        let Some(ending) = ending else {
            return;
        };
        progress.ending_chosen = Some(ending);
        progress.completion_timestamp = self
            .read_string(StorageKey::CompletionTimestamp)
            .and_then(|at| DateTime::parse_from_rfc3339(&at).ok())
            .map(|at| at.with_timezone(&Utc));
        debug!(ending = %ending, "folded standalone completion keys into progress");
    }

    fn read_string(&mut self, key: StorageKey) -> Option<String> {
        match self.backend.get(&key.namespaced()) {
            Ok(raw) => raw.and_then(|json| serde_json::from_str::<String>(&json).ok()),
            Err(e) => {
                self.degrade(key, &e);
                None
            }
        }
    }

    fn persist_view(&mut self) -> bool {
        match serde_json::to_string(&self.view) {
            Ok(json) => self.write(StorageKey::Progress, &json),
            Err(e) => {
                warn!(error = %e, "progress record could not be serialized");
                false
            }
        }
    }

    fn write(&mut self, key: StorageKey, value: &str) -> bool {
        if self.degraded {
            return false;
        }
        match self.backend.set(&key.namespaced(), value) {
            Ok(()) => true,
            Err(e) => {
                self.degrade(key, &e);
                false
            }
        }
    }

    fn remove(&mut self, key: StorageKey) -> bool {
        if self.degraded {
            return false;
        }
        match self.backend.remove(&key.namespaced()) {
            Ok(()) => true,
            Err(e) => {
                self.degrade(key, &e);
                false
            }
        }
    }

    fn degrade(&mut self, key: StorageKey, error: &StorageError) {
        if !self.degraded {
            warn!(key = %key, error = %error, "storage unavailable; progress will not survive reload");
        }
        self.degraded = true;
    }
}
