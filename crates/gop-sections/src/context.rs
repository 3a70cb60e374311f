//! Shared services handed to every section.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use gop_content::application::library::ContentLibrary;
use gop_content::domain::config::Timing;
use gop_core::clock::Clock;
use gop_core::rng::DeterministicRng;
use gop_gate::domain::gate;
use gop_progress::application::progress_store::ProgressStore;

use crate::presenter::{Presenter, ViewUpdate};

/// Services a section needs. Cheap to clone; timer tasks take a clone.
#[derive(Clone)]
pub struct SectionContext {
    pub store: Arc<Mutex<ProgressStore>>,
    pub presenter: Arc<dyn Presenter>,
    pub clock: Arc<dyn Clock>,
    pub rng: Arc<Mutex<dyn DeterministicRng>>,
    pub content: Arc<ContentLibrary>,
}

impl SectionContext {
    #[must_use]
    pub fn new(
        store: ProgressStore,
        presenter: Arc<dyn Presenter>,
        clock: Arc<dyn Clock>,
        rng: Arc<Mutex<dyn DeterministicRng>>,
        content: ContentLibrary,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            presenter,
            clock,
            rng,
            content: Arc::new(content),
        }
    }

    /// Locks the progress store. A poisoned lock is recovered; the store
    /// keeps its own in-memory view consistent.
    pub fn store(&self) -> MutexGuard<'_, ProgressStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn rng(&self) -> MutexGuard<'_, dyn DeterministicRng + 'static> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn timing(&self) -> Timing {
        *self.content.timing()
    }

    pub fn render(&self, update: ViewUpdate) {
        self.presenter.render(update);
    }

    pub fn status(&self, message: impl Into<String>, hold_ms: u64) {
        self.render(ViewUpdate::Status {
            message: message.into(),
            hold_ms,
        });
    }

    /// Pushes gate visibility and, when the gate is open, the beacon count
    /// status line.
    pub fn refresh_gate(&self) {
        let progress = self.store().load();
        let visible = gate::is_gate_visible(&progress);
        self.render(ViewUpdate::Gate {
            visible,
            beacon_count: progress.beacon_count(),
        });
        if let Some(message) = gate::gate_status_message(&progress) {
            self.status(message, self.timing().status_hold);
        }
    }
}

impl std::fmt::Debug for SectionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionContext")
            .field("store", &self.store)
            .field("content", &self.content)
            .finish_non_exhaustive()
    }
}
