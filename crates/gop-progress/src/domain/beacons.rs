//! Beacon collection.
//!
//! Collecting is pure and idempotent. Persisting the result and
//! re-evaluating the gate are the caller's job.

use super::progress::{BeaconId, Progress};

/// Adds `beacon` to the record's collected set.
///
/// Returns the updated record and whether it changed. Adding a beacon that
/// is already present returns the input unchanged with `false`.
#[must_use]
pub fn add(mut progress: Progress, beacon: BeaconId) -> (Progress, bool) {
    let changed = progress.collected_beacons.insert(beacon);
    (progress, changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_new_beacon_reports_change() {
        // Arrange
        let progress = Progress::default();

        // Act
        let (updated, changed) = add(progress, BeaconId::VisualBeacon);

        // Assert
        assert!(changed);
        assert!(updated.has_beacon(BeaconId::VisualBeacon));
        assert_eq!(updated.beacon_count(), 1);
    }

    #[test]
    fn test_add_is_idempotent() {
        // Arrange
        let (once, _) = add(Progress::default(), BeaconId::DataBeacon);

        // Act
        let (twice, changed) = add(once.clone(), BeaconId::DataBeacon);

        // Assert
        assert!(!changed);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_beacon_count_never_decreases() {
        let sequence = [
            BeaconId::LogicBeacon,
            BeaconId::BinaryRevelation,
            BeaconId::LogicBeacon,
            BeaconId::VisualBeacon,
            BeaconId::BinaryRevelation,
            BeaconId::DataBeacon,
        ];

        let mut progress = Progress::default();
        let mut last_count = 0;
        for beacon in sequence {
            let (next, _) = add(progress, beacon);
            assert!(next.beacon_count() >= last_count);
            last_count = next.beacon_count();
            progress = next;
        }

        assert_eq!(progress.beacon_count(), 4);
    }

    #[test]
    fn test_add_leaves_other_fields_untouched() {
        let progress = Progress {
            has_accepted_revelation: true,
            ..Progress::default()
        };

        let (updated, _) = add(progress, BeaconId::BinaryRevelation);

        assert!(updated.has_accepted_revelation);
        assert_eq!(updated.ending_chosen, None);
    }
}
