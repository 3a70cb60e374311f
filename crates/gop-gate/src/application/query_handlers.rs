//! Query handlers for the Gate context.

use gop_progress::domain::progress::{Ending, Progress};
use serde::Serialize;

use crate::domain::gate;
use crate::domain::landing::{self, Landing};

/// Read-only view of the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateView {
    /// Whether the gate is shown.
    pub visible: bool,
    /// Collected beacons.
    pub beacon_count: usize,
    /// Status line for a visible gate.
    pub status_message: Option<String>,
    /// The recorded ending, if any.
    pub ending: Option<Ending>,
    /// Where the recorded ending leaves the player.
    pub landing: Option<Landing>,
}

/// Builds the gate view for `progress`.
#[must_use]
pub fn gate_view(progress: &Progress) -> GateView {
    GateView {
        visible: gate::is_gate_visible(progress),
        beacon_count: progress.beacon_count(),
        status_message: gate::gate_status_message(progress),
        ending: progress.ending_chosen,
        landing: progress.ending_chosen.map(landing::landing),
    }
}
