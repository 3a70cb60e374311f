//! Command handlers for the Trials context.
//!
//! A validated outcome is recorded here: a pass collects the trial's beacon
//! through the `ProgressStore` and moves the quarantine flow forward.

use gop_core::error::DomainError;
use gop_progress::application::command_handlers::{BeaconCollected, collect_beacon};
use gop_progress::application::progress_store::ProgressStore;
use tracing::info;

use crate::domain::flow::{QuarantineFlow, TrialStage};
use crate::domain::outcome::TrialOutcome;

/// What recording one trial outcome did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialReport {
    /// The validated outcome.
    pub outcome: TrialOutcome,
    /// Beacon collection result, present only for passing outcomes.
    pub collected: Option<BeaconCollected>,
    /// The stage the flow moved to, if it moved.
    pub advanced_to: Option<TrialStage>,
}

/// Records `outcome` against the store and the flow.
///
/// # Errors
///
/// Returns `DomainError::Terminal` if the flow has already reached an
/// ending; nothing is collected in that case.
pub fn record_outcome(
    store: &mut ProgressStore,
    flow: &mut QuarantineFlow,
    outcome: TrialOutcome,
) -> Result<TrialReport, DomainError> {
    if flow.is_terminal() {
        return Err(DomainError::Terminal);
    }

    if !outcome.passed {
        return Ok(TrialReport {
            outcome,
            collected: None,
            advanced_to: None,
        });
    }

    let collected = collect_beacon(store, outcome.beacon_id);
    let advanced_to = flow.on_trial_passed(outcome.trial)?;
    info!(
        trial = %outcome.trial,
        beacon = %outcome.beacon_id,
        stage = %flow.stage(),
        "trial passed"
    );

    Ok(TrialReport {
        outcome,
        collected: Some(collected),
        advanced_to,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gop_progress::domain::progress::{BeaconId, Ending, Progress, ProgressPatch};
    use gop_storage::MemoryStore;

    use super::*;
    use crate::domain::{data, logic, visual};

    fn fresh() -> (ProgressStore, QuarantineFlow) {
        let store = ProgressStore::open(Arc::new(MemoryStore::new()));
        (store, QuarantineFlow::default())
    }

    #[test]
    fn test_passing_outcome_collects_beacon_and_advances() {
        // Arrange
        let (mut store, mut flow) = fresh();

        // Act
        let report = record_outcome(&mut store, &mut flow, visual::validate(800)).unwrap();

        // Assert
        assert_eq!(report.advanced_to, Some(TrialStage::Data));
        assert_eq!(report.collected.map(|c| c.changed), Some(true));
        assert!(store.load().has_beacon(BeaconId::VisualBeacon));
    }

    #[test]
    fn test_failing_outcome_changes_nothing() {
        let (mut store, mut flow) = fresh();

        let report = record_outcome(&mut store, &mut flow, data::validate("seeing")).unwrap();

        assert_eq!(report.collected, None);
        assert_eq!(report.advanced_to, None);
        assert_eq!(store.load(), Progress::default());
        assert_eq!(flow.stage(), TrialStage::Visual);
    }

    #[test]
    fn test_full_trial_sequence_reaches_final_decision() {
        // Arrange
        let (mut store, mut flow) = fresh();

        // Act
        record_outcome(&mut store, &mut flow, visual::validate(768)).unwrap();
        record_outcome(&mut store, &mut flow, data::validate("\"see\"")).unwrap();
        let report = record_outcome(
            &mut store,
            &mut flow,
            logic::validate(&logic::CANONICAL_ORDER.map(Some)),
        )
        .unwrap();

        // Assert
        assert_eq!(report.advanced_to, Some(TrialStage::FinalDecision));
        assert_eq!(report.collected.map(|c| c.beacon_count), Some(3));
    }

    #[test]
    fn test_terminal_flow_rejects_outcomes() {
        // Arrange
        let mut store = ProgressStore::open(Arc::new(MemoryStore::new()));
        store.save(ProgressPatch {
            ending_chosen: Some(Ending::Blind),
            ..ProgressPatch::default()
        });
        let mut flow = QuarantineFlow::resume(&store.load());

        // Act
        let result = record_outcome(&mut store, &mut flow, data::validate("see"));

        // Assert
        assert!(matches!(result, Err(DomainError::Terminal)));
        assert!(!store.load().has_beacon(BeaconId::DataBeacon));
    }
}
