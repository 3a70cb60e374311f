//! The rendering seam.
//!
//! Sections never touch a view directly; they describe what changed as a
//! `ViewUpdate` and hand it to whatever `Presenter` they were given.

use std::sync::{Mutex, PoisonError};

use gop_content::domain::scriptures::GospelManuscript;
use gop_gate::domain::landing::Landing;
use gop_progress::domain::progress::{Progress, Section};
use gop_trials::domain::flow::TrialStage;
use gop_trials::domain::outcome::{TrialKind, TrialOutcome};
use gop_trials::domain::reveal::{HiddenPayload, ZoomHint};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// One change to what the player sees.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewUpdate {
    SectionEntered {
        section: Section,
        visit_id: Uuid,
    },
    /// A custom status bar line, held for `hold_ms`.
    Status {
        message: String,
        hold_ms: u64,
    },
    Gate {
        visible: bool,
        beacon_count: usize,
    },
    CrossDimensionHint {
        visible: bool,
    },
    HomeScreenHint {
        visible: bool,
    },
    RevelationPrompt,
    Manuscript {
        manuscript: Option<GospelManuscript>,
    },
    Zoom {
        scale: f64,
        hint: ZoomHint,
    },
    PayloadRevealed {
        payload: HiddenPayload,
        decoded: String,
    },
    PayloadConcealed,
    TrialMarkerLit {
        trial: TrialKind,
    },
    TrialFeedback {
        outcome: TrialOutcome,
        message: &'static str,
    },
    Stage {
        stage: TrialStage,
    },
    LogicBoard {
        pool: Vec<String>,
        slots: Vec<Option<String>>,
    },
    Landing {
        landing: Landing,
    },
    Navigate {
        section: Section,
        query: String,
    },
    DebugSnapshot {
        progress: Progress,
    },
}

/// Receives view updates.
pub trait Presenter: Send + Sync {
    fn render(&self, update: ViewUpdate);
}

/// Writes every update to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn render(&self, update: ViewUpdate) {
        match serde_json::to_string(&update) {
            Ok(json) => info!(update = %json, "render"),
            Err(e) => info!(update = ?update, error = %e, "render"),
        }
    }
}

/// Keeps every update in order, for assertions.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    updates: Mutex<Vec<ViewUpdate>>,
}

impl RecordingPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything rendered so far.
    #[must_use]
    pub fn updates(&self) -> Vec<ViewUpdate> {
        self.updates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Status lines rendered so far.
    #[must_use]
    pub fn statuses(&self) -> Vec<String> {
        self.updates()
            .into_iter()
            .filter_map(|update| match update {
                ViewUpdate::Status { message, .. } => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Whether any rendered update satisfies `predicate`.
    pub fn saw(&self, predicate: impl Fn(&ViewUpdate) -> bool) -> bool {
        self.updates().iter().any(predicate)
    }

    pub fn clear(&self) {
        self.updates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Presenter for RecordingPresenter {
    fn render(&self, update: ViewUpdate) {
        self.updates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(update);
    }
}
