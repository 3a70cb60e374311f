//! Command handlers for the Gate context.

use gop_core::clock::Clock;
use gop_progress::application::progress_store::ProgressStore;
use gop_progress::domain::progress::{Ending, Progress};
use tracing::{info, warn};

use crate::domain::gate;

/// Result of choosing an ending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndingChosen {
    /// The record after the call.
    pub progress: Progress,
    /// Whether this call recorded the ending.
    pub changed: bool,
    /// Whether everything reached the backend. `true` when nothing needed
    /// saving.
    pub persisted: bool,
}

/// Chooses `choice` as the ending and persists it when the record changed.
pub fn handle_choose_ending(
    store: &mut ProgressStore,
    choice: Ending,
    clock: &dyn Clock,
) -> EndingChosen {
    let (progress, changed) = gate::choose_ending(store.load(), choice, clock);
    if !changed {
        return EndingChosen {
            progress,
            changed,
            persisted: true,
        };
    }

    let persisted = match progress.completion_timestamp {
        Some(at) => store.record_ending(choice, at),
        None => false,
    };
    if persisted {
        info!(ending = %choice, "ending chosen");
    } else {
        warn!(ending = %choice, "ending chosen but not persisted");
    }

    EndingChosen {
        progress,
        changed,
        persisted,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gop_core::storage::KeyValueStore;
    use gop_progress::application::progress_store::StorageKey;
    use gop_storage::MemoryStore;
    use gop_test_support::{FixedClock, UnavailableStore, fixed_instant};

    use super::*;

    #[test]
    fn test_choose_ending_persists_record_and_completion_keys() {
        // Arrange
        let backend = Arc::new(MemoryStore::new());
        let mut store = ProgressStore::open(backend.clone());

        // Act
        let result = handle_choose_ending(&mut store, Ending::See, &FixedClock::default());

        // Assert
        assert!(result.changed);
        assert!(result.persisted);
        assert_eq!(
            backend
                .get(&StorageKey::EndingChosen.namespaced())
                .unwrap()
                .as_deref(),
            Some("\"see\"")
        );
        assert_eq!(
            backend
                .get(&StorageKey::CompletionTimestamp.namespaced())
                .unwrap()
                .as_deref(),
            Some("\"2026-01-15T10:00:00.000Z\"")
        );
    }

    #[test]
    fn test_second_choice_is_ignored() {
        // Arrange
        let mut store = ProgressStore::open(Arc::new(MemoryStore::new()));
        handle_choose_ending(&mut store, Ending::Blind, &FixedClock::default());
        let later = FixedClock(fixed_instant() + chrono::Duration::minutes(5));

        // Act
        let result = handle_choose_ending(&mut store, Ending::See, &later);

        // Assert
        assert!(!result.changed);
        assert_eq!(result.progress.ending_chosen, Some(Ending::Blind));
        assert_eq!(store.load().completion_timestamp, Some(fixed_instant()));
    }

    #[test]
    fn test_unavailable_storage_still_records_in_memory() {
        let mut store = ProgressStore::open(Arc::new(UnavailableStore));

        let result = handle_choose_ending(&mut store, Ending::See, &FixedClock::default());

        assert!(result.changed);
        assert!(!result.persisted);
        assert_eq!(store.load().ending_chosen, Some(Ending::See));
    }
}
