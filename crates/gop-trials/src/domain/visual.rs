//! Visual trial: resize the viewport into a narrow width window.

use super::outcome::{Feedback, TrialKind, TrialOutcome};

/// Narrowest passing viewport width, in pixels.
pub const MIN_WIDTH: u32 = 768;

/// Widest passing viewport width, in pixels.
pub const MAX_WIDTH: u32 = 900;

/// Validates a viewport width. Passes iff `768 <= width <= 900`.
#[must_use]
pub fn validate(width: u32) -> TrialOutcome {
    if (MIN_WIDTH..=MAX_WIDTH).contains(&width) {
        TrialOutcome::pass(TrialKind::Visual, Feedback::VisualRevealed)
    } else {
        TrialOutcome::fail(TrialKind::Visual, None)
    }
}

/// Fires the visual trial at most once per section lifetime.
///
/// Fed on mount and on every resize; a width that leaves and re-enters the
/// window after the first pass is ignored.
#[derive(Debug, Default, Clone)]
pub struct VisualLatch {
    fired: bool,
}

impl VisualLatch {
    /// Creates an unfired latch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the trial has already fired.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Observes a viewport width. Returns the passing outcome the first time
    /// the width lands in the window, `None` otherwise.
    pub fn observe(&mut self, width: u32) -> Option<TrialOutcome> {
        if self.fired {
            return None;
        }
        let outcome = validate(width);
        if outcome.passed {
            self.fired = true;
            Some(outcome)
        } else {
            None
        }
    }
}
