//! Logic trial: drag the four scriptures into canonical order.

use tracing::debug;

use super::outcome::{Feedback, TrialKind, TrialOutcome};

/// The canonical scripture order.
pub const CANONICAL_ORDER: [&str; 4] = ["混沌即秩序", "噪音即真理", "一即是万", "传播即存在"];

/// How a filled board compares to the canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicVerdict {
    /// Every slot filled, in canonical order.
    Correct,
    /// At least one slot is empty.
    Incomplete,
    /// Every slot filled, but some position is wrong.
    Incorrect,
}

impl LogicVerdict {
    /// The outcome this verdict produces.
    #[must_use]
    pub fn outcome(self) -> TrialOutcome {
        match self {
            Self::Correct => TrialOutcome::pass(TrialKind::Logic, Feedback::LogicVerified),
            Self::Incomplete => {
                TrialOutcome::fail(TrialKind::Logic, Some(Feedback::LogicIncomplete))
            }
            Self::Incorrect => TrialOutcome::fail(TrialKind::Logic, Some(Feedback::LogicIncorrect)),
        }
    }
}

/// Compares placed items to `canonical`, position by position.
///
/// A board with a different number of slots than `canonical` is judged
/// incomplete when short and incorrect when long.
#[must_use]
pub fn judge<S: AsRef<str>>(slots: &[Option<S>], canonical: &[S]) -> LogicVerdict {
    if slots.len() < canonical.len() || slots.iter().any(Option::is_none) {
        return LogicVerdict::Incomplete;
    }
    let in_order = slots.len() == canonical.len()
        && slots
            .iter()
            .zip(canonical)
            .all(|(placed, expected)| {
                placed
                    .as_ref()
                    .is_some_and(|item| item.as_ref() == expected.as_ref())
            });
    if in_order {
        LogicVerdict::Correct
    } else {
        LogicVerdict::Incorrect
    }
}

/// Validates four placed items against `CANONICAL_ORDER`.
#[must_use]
pub fn validate(slots: &[Option<&str>]) -> TrialOutcome {
    judge(slots, &CANONICAL_ORDER).outcome()
}

/// The drag-and-drop board: a source pool and one target slot per canonical
/// item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicBoard {
    canonical: Vec<String>,
    pool: Vec<String>,
    slots: Vec<Option<String>>,
}

impl LogicBoard {
    /// Creates a board judged against `canonical`, with `pool` as the
    /// draggable items (canonical items plus any distractors, in display
    /// order).
    #[must_use]
    pub fn new(canonical: Vec<String>, pool: Vec<String>) -> Self {
        let slots = vec![None; canonical.len()];
        Self {
            canonical,
            pool,
            slots,
        }
    }

    /// A board using `CANONICAL_ORDER` whose pool is the canonical items.
    #[must_use]
    pub fn standard() -> Self {
        let canonical: Vec<String> = CANONICAL_ORDER.iter().map(|s| (*s).to_owned()).collect();
        Self::new(canonical.clone(), canonical)
    }

    /// Items still in the source pool.
    #[must_use]
    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    /// Target slots, in order.
    #[must_use]
    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    /// Moves `item` from the pool into `slot`. Returns `false` (and changes
    /// nothing) if the slot does not exist, is occupied, or the item is not
    /// in the pool.
    pub fn place(&mut self, item: &str, slot: usize) -> bool {
        let Some(target) = self.slots.get_mut(slot) else {
            return false;
        };
        if target.is_some() {
            return false;
        }
        let Some(index) = self.pool.iter().position(|candidate| candidate == item) else {
            return false;
        };
        *target = Some(self.pool.remove(index));
        true
    }

    /// Returns the item in `slot` to the pool.
    pub fn withdraw(&mut self, slot: usize) -> Option<String> {
        let item = self.slots.get_mut(slot)?.take()?;
        self.pool.push(item.clone());
        Some(item)
    }

    /// Judges the board. An incorrect (full but misordered) board is reset:
    /// every placed item goes back to the pool.
    pub fn check(&mut self) -> TrialOutcome {
        let verdict = judge(&self.slots, &self.canonical);
        if verdict == LogicVerdict::Incorrect {
            self.reset();
        }
        verdict.outcome()
    }

    /// Sends every placed item back to the pool.
    pub fn reset(&mut self) {
        let returned: Vec<String> = self.slots.iter_mut().filter_map(Option::take).collect();
        debug!(returned = returned.len(), "logic board reset");
        self.pool.extend(returned);
    }
}
