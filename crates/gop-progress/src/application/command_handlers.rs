//! Command handlers for the Progress context.
//!
//! Each handler loads the current record through the injected
//! `ProgressStore`, applies one domain change, and saves only what changed.

use tracing::{debug, info};

use crate::application::progress_store::ProgressStore;
use crate::domain::beacons;
use crate::domain::progress::{BeaconId, ProgressPatch, Section};

/// Result of collecting a beacon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeaconCollected {
    /// Whether the beacon was new.
    pub changed: bool,
    /// Whether the updated set reached the backend. `true` when nothing
    /// needed saving.
    pub persisted: bool,
    /// Collected beacons after the call.
    pub beacon_count: usize,
}

/// Set-once boolean flags of the progress record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressFlag {
    /// The revelation was accepted on the gospel page.
    AcceptedRevelation,
    /// The cross-dimension hint was confirmed.
    WitnessedCrossDimension,
    /// The add-to-home-screen hint was dismissed.
    AddedToHomeScreen,
}

/// Collects `beacon`, saving the full updated set when it is new.
pub fn collect_beacon(store: &mut ProgressStore, beacon: BeaconId) -> BeaconCollected {
    let (progress, changed) = beacons::add(store.load(), beacon);
    let beacon_count = progress.beacon_count();

    if !changed {
        debug!(beacon = %beacon, "beacon already collected");
        return BeaconCollected {
            changed,
            persisted: true,
            beacon_count,
        };
    }

    let persisted = store.save(ProgressPatch::beacons(progress.collected_beacons));
    info!(beacon = %beacon, beacon_count, persisted, "beacon collected");

    BeaconCollected {
        changed,
        persisted,
        beacon_count,
    }
}

/// Records entry into `section`. Returns whether the write persisted.
pub fn enter_section(store: &mut ProgressStore, section: Section) -> bool {
    debug!(section = %section, "entering section");
    store.save(ProgressPatch::section(section))
}

/// Raises a set-once flag. Returns `true` only if the flag was newly set;
/// a flag that is already up is never rewritten.
pub fn raise_flag(store: &mut ProgressStore, flag: ProgressFlag) -> bool {
    let progress = store.load();
    let (already_set, patch) = match flag {
        ProgressFlag::AcceptedRevelation => (
            progress.has_accepted_revelation,
            ProgressPatch {
                has_accepted_revelation: Some(true),
                ..ProgressPatch::default()
            },
        ),
        ProgressFlag::WitnessedCrossDimension => (
            progress.has_witnessed_cross_dimension,
            ProgressPatch {
                has_witnessed_cross_dimension: Some(true),
                ..ProgressPatch::default()
            },
        ),
        ProgressFlag::AddedToHomeScreen => (
            progress.has_added_to_home_screen,
            ProgressPatch {
                has_added_to_home_screen: Some(true),
                ..ProgressPatch::default()
            },
        ),
    };

    if already_set {
        return false;
    }
    let persisted = store.save(patch);
    info!(flag = ?flag, persisted, "progress flag raised");
    true
}
