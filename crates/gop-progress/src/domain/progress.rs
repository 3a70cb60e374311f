//! The `Progress` record and its value types.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::warn;

/// A one-time achievement token. Presence, not count or order, drives gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeaconId {
    /// Zooming the gospel illustration past the reveal threshold.
    BinaryRevelation,
    /// Resizing the viewport into the visual trial's window.
    VisualBeacon,
    /// Correcting the belief in the data trial.
    DataBeacon,
    /// Ordering the scriptures in the logic trial.
    LogicBeacon,
}

impl BeaconId {
    /// Every beacon in the vocabulary.
    pub const ALL: [Self; 4] = [
        Self::BinaryRevelation,
        Self::VisualBeacon,
        Self::DataBeacon,
        Self::LogicBeacon,
    ];

    /// The stored token for this beacon.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BinaryRevelation => "BINARY_REVELATION",
            Self::VisualBeacon => "VISUAL_BEACON",
            Self::DataBeacon => "DATA_BEACON",
            Self::LogicBeacon => "LOGIC_BEACON",
        }
    }
}

impl fmt::Display for BeaconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token outside the beacon vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown beacon token: {0}")]
pub struct UnknownBeacon(pub String);

impl FromStr for BeaconId {
    type Err = UnknownBeacon;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|beacon| beacon.as_str() == s)
            .ok_or_else(|| UnknownBeacon(s.to_owned()))
    }
}

/// Major section of the experience.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// The landing archive.
    #[default]
    Index,
    /// The gospel manuscript with the zoom-reveal illustration.
    Gospel,
    /// The quarantine chamber hosting the three trials.
    Quarantine,
}

impl Section {
    /// Lowercase name used in storage and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Gospel => "gospel",
            Self::Quarantine => "quarantine",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two mutually exclusive terminal outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ending {
    /// The player closes their eyes.
    Blind,
    /// The player keeps looking.
    See,
}

impl Ending {
    /// Lowercase name used in storage and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blind => "blind",
            Self::See => "see",
        }
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that names neither ending.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ending: {0}")]
pub struct UnknownEnding(pub String);

impl FromStr for Ending {
    type Err = UnknownEnding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blind" => Ok(Self::Blind),
            "see" => Ok(Self::See),
            other => Err(UnknownEnding(other.to_owned())),
        }
    }
}

/// The player's persisted progress. One record per browser profile.
///
/// Missing fields deserialize to their defaults so records written before
/// endings existed still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progress {
    /// Set once the player accepts the revelation on the gospel page.
    pub has_accepted_revelation: bool,
    /// Set once the player confirms the cross-dimension hint.
    pub has_witnessed_cross_dimension: bool,
    /// Set once the add-to-home-screen hint is dismissed.
    pub has_added_to_home_screen: bool,
    /// Beacons collected so far. Only grows.
    #[serde(deserialize_with = "deserialize_beacons")]
    pub collected_beacons: BTreeSet<BeaconId>,
    /// Last major section entered.
    pub current_section: Section,
    /// The chosen ending; once set the record is terminal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_chosen: Option<Ending>,
    /// When the ending was chosen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_timestamp: Option<DateTime<Utc>>,
}

impl Progress {
    /// Whether `beacon` has been collected.
    #[must_use]
    pub fn has_beacon(&self, beacon: BeaconId) -> bool {
        self.collected_beacons.contains(&beacon)
    }

    /// Number of collected beacons.
    #[must_use]
    pub fn beacon_count(&self) -> usize {
        self.collected_beacons.len()
    }

    /// Whether an ending has been chosen.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.ending_chosen.is_some()
    }

    /// Returns this record with every field present in `patch` overwritten.
    #[must_use]
    pub fn merged(mut self, patch: ProgressPatch) -> Self {
        if let Some(value) = patch.has_accepted_revelation {
            self.has_accepted_revelation = value;
        }
        if let Some(value) = patch.has_witnessed_cross_dimension {
            self.has_witnessed_cross_dimension = value;
        }
        if let Some(value) = patch.has_added_to_home_screen {
            self.has_added_to_home_screen = value;
        }
        if let Some(beacons) = patch.collected_beacons {
            self.collected_beacons = beacons;
        }
        if let Some(section) = patch.current_section {
            self.current_section = section;
        }
        if let Some(ending) = patch.ending_chosen {
            self.ending_chosen = Some(ending);
        }
        if let Some(at) = patch.completion_timestamp {
            self.completion_timestamp = Some(at);
        }
        self
    }
}

/// A shallow partial update of `Progress`.
///
/// `collected_beacons` replaces the whole set: callers pass the full updated
/// set, never a delta.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct ProgressPatch {
    /// New value for `has_accepted_revelation`.
    pub has_accepted_revelation: Option<bool>,
    /// New value for `has_witnessed_cross_dimension`.
    pub has_witnessed_cross_dimension: Option<bool>,
    /// New value for `has_added_to_home_screen`.
    pub has_added_to_home_screen: Option<bool>,
    /// Replacement beacon set.
    pub collected_beacons: Option<BTreeSet<BeaconId>>,
    /// New current section.
    pub current_section: Option<Section>,
    /// Ending to record.
    pub ending_chosen: Option<Ending>,
    /// Completion time to record.
    pub completion_timestamp: Option<DateTime<Utc>>,
}

impl ProgressPatch {
    /// Patch that only moves `current_section`.
    pub fn section(section: Section) -> Self {
        Self {
            current_section: Some(section),
            ..Self::default()
        }
    }

    /// Patch that replaces the beacon set.
    pub fn beacons(beacons: BTreeSet<BeaconId>) -> Self {
        Self {
            collected_beacons: Some(beacons),
            ..Self::default()
        }
    }

    /// Patch that records an ending and its completion time.
    pub fn ending(ending: Ending, at: DateTime<Utc>) -> Self {
        Self {
            ending_chosen: Some(ending),
            completion_timestamp: Some(at),
            ..Self::default()
        }
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Reads the stored beacon list, dropping tokens outside the vocabulary.
fn deserialize_beacons<'de, D>(deserializer: D) -> Result<BTreeSet<BeaconId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
    let mut beacons = BTreeSet::new();
    for token in raw.unwrap_or_default() {
        match token.parse::<BeaconId>() {
            Ok(beacon) => {
                beacons.insert(beacon);
            }
            Err(e) => warn!(error = %e, "dropping unrecognized beacon from stored progress"),
        }
    }
    Ok(beacons)
}
