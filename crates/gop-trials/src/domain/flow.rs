//! Quarantine stage machine.
//!
//! `Visual -> Data -> Logic -> FinalDecision -> Ending(blind | see)`.
//! Each trial's success moves the flow to the stage after that trial;
//! `FinalDecision` is only entered from a logic success, and an ending stage
//! is terminal.

use std::fmt;

use gop_core::error::DomainError;
use gop_progress::domain::progress::{Ending, Progress};
use serde::Serialize;
use tracing::debug;

use super::outcome::TrialKind;

/// Position in the quarantine flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialStage {
    /// Waiting for the viewport to enter the visual window.
    Visual,
    /// Waiting for the corrected belief.
    Data,
    /// Waiting for the scriptures to be ordered.
    Logic,
    /// All trials passed; the player must choose an ending.
    FinalDecision,
    /// Terminal.
    Ending(Ending),
}

impl TrialStage {
    /// The trial this stage waits on, if any.
    #[must_use]
    pub fn trial(self) -> Option<TrialKind> {
        match self {
            Self::Visual => Some(TrialKind::Visual),
            Self::Data => Some(TrialKind::Data),
            Self::Logic => Some(TrialKind::Logic),
            Self::FinalDecision | Self::Ending(_) => None,
        }
    }

    /// The stage a success in `trial` leads to.
    #[must_use]
    pub fn after(trial: TrialKind) -> Self {
        match trial {
            TrialKind::Visual => Self::Data,
            TrialKind::Data => Self::Logic,
            TrialKind::Logic => Self::FinalDecision,
        }
    }

    /// Whether this is an ending stage.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ending(_))
    }

    fn rank(self) -> u8 {
        match self {
            Self::Visual => 0,
            Self::Data => 1,
            Self::Logic => 2,
            Self::FinalDecision => 3,
            Self::Ending(_) => 4,
        }
    }
}

impl fmt::Display for TrialStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visual => f.write_str("visual"),
            Self::Data => f.write_str("data"),
            Self::Logic => f.write_str("logic"),
            Self::FinalDecision => f.write_str("final_decision"),
            Self::Ending(ending) => write!(f, "ending_{ending}"),
        }
    }
}

/// The quarantine flow for one section visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarantineFlow {
    stage: TrialStage,
}

impl Default for QuarantineFlow {
    fn default() -> Self {
        Self {
            stage: TrialStage::Visual,
        }
    }
}

impl QuarantineFlow {
    /// Resumes from persisted progress: the ending stage when an ending is
    /// recorded, otherwise the first trial whose beacon is missing, otherwise
    /// the final decision.
    #[must_use]
    pub fn resume(progress: &Progress) -> Self {
        if let Some(ending) = progress.ending_chosen {
            return Self {
                stage: TrialStage::Ending(ending),
            };
        }
        let stage = TrialKind::ALL
            .into_iter()
            .find(|trial| !progress.has_beacon(trial.beacon()))
            .map_or(TrialStage::FinalDecision, |trial| match trial {
                TrialKind::Visual => TrialStage::Visual,
                TrialKind::Data => TrialStage::Data,
                TrialKind::Logic => TrialStage::Logic,
            });
        Self { stage }
    }

    /// The current stage.
    #[must_use]
    pub fn stage(&self) -> TrialStage {
        self.stage
    }

    /// Whether an ending has been reached.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.stage.is_terminal()
    }

    /// Registers a passed trial. Returns the new stage if the flow moved
    /// forward; a success for a trial already behind the flow changes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Terminal` once an ending has been chosen.
    pub fn on_trial_passed(&mut self, trial: TrialKind) -> Result<Option<TrialStage>, DomainError> {
        if self.is_terminal() {
            return Err(DomainError::Terminal);
        }
        let next = TrialStage::after(trial);
        if next.rank() <= self.stage.rank() {
            debug!(trial = %trial, stage = %self.stage, "trial passed behind current stage");
            return Ok(None);
        }
        debug!(from = %self.stage, to = %next, "quarantine stage advanced");
        self.stage = next;
        Ok(Some(next))
    }

    /// Moves from the final decision to `ending`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Terminal` if an ending was already chosen and
    /// `DomainError::Validation` if the final decision has not been reached.
    pub fn choose_ending(&mut self, ending: Ending) -> Result<TrialStage, DomainError> {
        match self.stage {
            TrialStage::Ending(_) => Err(DomainError::Terminal),
            TrialStage::FinalDecision => {
                self.stage = TrialStage::Ending(ending);
                Ok(self.stage)
            }
            other => Err(DomainError::Validation(format!(
                "final decision not reached; current stage is {other}"
            ))),
        }
    }
}
