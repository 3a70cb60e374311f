//! Query handlers for the Trials context.

use gop_progress::domain::progress::Progress;
use serde::Serialize;

use crate::domain::flow::{QuarantineFlow, TrialStage};
use crate::domain::outcome::TrialKind;

/// Read-only view of the quarantine state derived from progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarantineView {
    /// Stage a fresh visit would resume at.
    pub stage: TrialStage,
    /// Trials whose beacon has been collected, in presentation order.
    pub collected_trials: Vec<TrialKind>,
}

/// Trials whose beacon is already collected; their markers are lit on
/// mount.
#[must_use]
pub fn collected_trials(progress: &Progress) -> Vec<TrialKind> {
    TrialKind::ALL
        .into_iter()
        .filter(|trial| progress.has_beacon(trial.beacon()))
        .collect()
}

/// Builds the quarantine view for `progress`.
#[must_use]
pub fn quarantine_view(progress: &Progress) -> QuarantineView {
    QuarantineView {
        stage: QuarantineFlow::resume(progress).stage(),
        collected_trials: collected_trials(progress),
    }
}
