//! Gate rules.
//!
//! Both operations are pure over `Progress`; persistence happens in the
//! application layer.

use gop_core::clock::Clock;
use gop_progress::domain::progress::{Ending, Progress};
use tracing::debug;

/// Whether the quarantine gate is shown. True once any beacon is collected.
#[must_use]
pub fn is_gate_visible(progress: &Progress) -> bool {
    progress.beacon_count() > 0
}

/// Status line shown with a visible gate, `None` while it is hidden.
#[must_use]
pub fn gate_status_message(progress: &Progress) -> Option<String> {
    is_gate_visible(progress).then(|| format!("已收集 {} 个确信道标", progress.beacon_count()))
}

/// Records `choice` as the ending, stamped with `clock.now()`.
///
/// The ending is write-once: if one is already recorded the record comes
/// back untouched. The flag is `true` only when the record changed.
#[must_use]
pub fn choose_ending(mut progress: Progress, choice: Ending, clock: &dyn Clock) -> (Progress, bool) {
    if let Some(existing) = progress.ending_chosen {
        debug!(existing = %existing, requested = %choice, "ending already chosen");
        return (progress, false);
    }
    progress.ending_chosen = Some(choice);
    progress.completion_timestamp = Some(clock.now());
    (progress, true)
}

#[cfg(test)]
mod tests {
    use gop_progress::domain::progress::BeaconId;
    use gop_test_support::{FixedClock, fixed_instant};

    use super::*;

    #[test]
    fn test_gate_hidden_without_beacons() {
        let progress = Progress::default();

        assert!(!is_gate_visible(&progress));
        assert_eq!(gate_status_message(&progress), None);
    }

    #[test]
    fn test_any_beacon_opens_gate() {
        for beacon in BeaconId::ALL {
            let mut progress = Progress::default();
            progress.collected_beacons.insert(beacon);

            assert!(is_gate_visible(&progress), "{beacon} should open the gate");
        }
    }

    #[test]
    fn test_status_message_counts_beacons() {
        let mut progress = Progress::default();
        progress.collected_beacons.insert(BeaconId::BinaryRevelation);
        progress.collected_beacons.insert(BeaconId::LogicBeacon);

        assert_eq!(
            gate_status_message(&progress).as_deref(),
            Some("已收集 2 个确信道标")
        );
    }

    #[test]
    fn test_choose_ending_sets_ending_and_timestamp() {
        // Arrange
        let clock = FixedClock::default();

        // Act
        let (progress, changed) = choose_ending(Progress::default(), Ending::See, &clock);

        // Assert
        assert!(changed);
        assert_eq!(progress.ending_chosen, Some(Ending::See));
        assert_eq!(progress.completion_timestamp, Some(fixed_instant()));
    }

    #[test]
    fn test_choose_ending_is_write_once() {
        // Arrange
        let first = FixedClock::default();
        let later = FixedClock(fixed_instant() + chrono::Duration::hours(1));
        let (progress, _) = choose_ending(Progress::default(), Ending::Blind, &first);

        // Act
        let (progress, changed) = choose_ending(progress, Ending::See, &later);

        // Assert
        assert!(!changed);
        assert_eq!(progress.ending_chosen, Some(Ending::Blind));
        assert_eq!(progress.completion_timestamp, Some(fixed_instant()));
    }
}
