//! The progress dump printed by `gop-inspect`.

use std::path::Path;
use std::sync::Arc;

use gop_gate::application::query_handlers::{GateView, gate_view};
use gop_progress::application::progress_store::ProgressStore;
use gop_progress::domain::progress::Progress;
use gop_storage::{DisabledStore, FileStore};
use gop_trials::application::query_handlers::{QuarantineView, quarantine_view};
use serde::Serialize;
use tracing::warn;

/// Everything known about one stored profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectReport {
    pub progress: Progress,
    pub gate: GateView,
    pub quarantine: QuarantineView,
    /// Whether storage failed while reading.
    pub degraded: bool,
}

/// Opens the progress store kept under `data_dir`.
///
/// A directory that cannot be opened leaves the store degraded: it reads as
/// the default record and nothing is written.
pub fn open_progress_store(data_dir: &Path) -> ProgressStore {
    match FileStore::open(data_dir) {
        Ok(backend) => ProgressStore::open(Arc::new(backend)),
        Err(e) => {
            warn!(data_dir = %data_dir.display(), error = %e, "data directory unusable; progress will not be kept");
            ProgressStore::open(Arc::new(DisabledStore::new(e.to_string())))
        }
    }
}

/// Loads the record and derives the gate and quarantine views from it.
pub fn inspect(store: &mut ProgressStore) -> InspectReport {
    let progress = store.load();
    InspectReport {
        gate: gate_view(&progress),
        quarantine: quarantine_view(&progress),
        degraded: store.is_degraded(),
        progress,
    }
}
