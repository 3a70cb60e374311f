//! Trial identity and the outcome every validator returns.

use std::fmt;

use gop_progress::domain::progress::BeaconId;
use serde::Serialize;

/// One of the three quarantine trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrialKind {
    /// Resize the viewport into a narrow width window.
    Visual,
    /// Correct the belief by typing the right word.
    Data,
    /// Put the four scriptures in canonical order.
    Logic,
}

impl TrialKind {
    /// All trials in the order the quarantine presents them.
    pub const ALL: [Self; 3] = [Self::Visual, Self::Data, Self::Logic];

    /// The beacon awarded for passing this trial.
    #[must_use]
    pub fn beacon(self) -> BeaconId {
        match self {
            Self::Visual => BeaconId::VisualBeacon,
            Self::Data => BeaconId::DataBeacon,
            Self::Logic => BeaconId::LogicBeacon,
        }
    }

    /// Lowercase name, matching the quarantine page's trial markers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Visual => "visual",
            Self::Data => "data",
            Self::Logic => "logic",
        }
    }
}

impl fmt::Display for TrialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical feedback shown after a trial attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    /// The viewport entered the visual window.
    VisualRevealed,
    /// The belief was corrected.
    BeliefCorrected,
    /// The typed belief was wrong.
    BeliefRejected,
    /// The scriptures are in canonical order.
    LogicVerified,
    /// At least one slot is still empty.
    LogicIncomplete,
    /// Every slot is filled but the order is wrong.
    LogicIncorrect,
}

impl Feedback {
    /// Player-facing text.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::VisualRevealed => "视觉真理已参透",
            Self::BeliefCorrected => "认知已修正，视野已清晰",
            Self::BeliefRejected => "认知修正失败，请重新尝试",
            Self::LogicVerified => "逻辑序列已验证，真理已显现",
            Self::LogicIncomplete => "请完成所有箴言的排序",
            Self::LogicIncorrect => "逻辑序列错误，请重新排列",
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of validating one trial attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialOutcome {
    /// The trial that was attempted.
    pub trial: TrialKind,
    /// Whether the attempt passed.
    pub passed: bool,
    /// The beacon this trial awards on success.
    pub beacon_id: BeaconId,
    /// Feedback to surface, if any. A visual width outside the window is
    /// silent.
    pub feedback: Option<Feedback>,
}

impl TrialOutcome {
    /// A passing outcome for `trial`.
    #[must_use]
    pub fn pass(trial: TrialKind, feedback: Feedback) -> Self {
        Self {
            trial,
            passed: true,
            beacon_id: trial.beacon(),
            feedback: Some(feedback),
        }
    }

    /// A failing outcome for `trial`.
    #[must_use]
    pub fn fail(trial: TrialKind, feedback: Option<Feedback>) -> Self {
        Self {
            trial,
            passed: false,
            beacon_id: trial.beacon(),
            feedback,
        }
    }

    /// Feedback text, empty when silent.
    #[must_use]
    pub fn feedback_message(&self) -> &'static str {
        self.feedback.map_or("", Feedback::message)
    }
}
