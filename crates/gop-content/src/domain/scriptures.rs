//! The scriptures document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Volume shown when none is named.
pub const DEFAULT_VOLUME: &str = "volume1";

/// Narrative text used across the sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scriptures {
    /// Lines the status bar rotates through.
    pub status_bar_messages: Vec<String>,
    /// Items for the logic trial.
    pub logic_puzzle: LogicPuzzle,
    /// Manuscript volumes keyed by volume id (`volume1`, ...).
    pub gospel_manuscripts: BTreeMap<String, GospelManuscript>,
}

/// Logic trial items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogicPuzzle {
    /// The four scriptures in the order that passes.
    pub correct_order: Vec<String>,
    /// Decoys mixed into the pool.
    pub distractors: Vec<String>,
}

/// One manuscript volume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GospelManuscript {
    pub title: String,
    pub passages: Vec<String>,
}
