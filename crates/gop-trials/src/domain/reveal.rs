//! Zoom-reveal puzzle on the gospel illustration.
//!
//! Gesture capture (wheel, pinch, keyboard) lives outside this crate and
//! feeds a single zoom level in. Crossing the reveal threshold swaps in the
//! revealed asset and exposes the hidden payload; zooming back out hides it
//! again.

use serde::{Deserialize, Serialize};

use super::binary::{self, BinaryError};

/// Smallest zoom level accepted.
pub const MIN_ZOOM: f64 = 0.5;
/// Largest zoom level accepted.
pub const MAX_ZOOM: f64 = 3.0;
/// Zoom level at which the payload is revealed.
pub const REVEAL_THRESHOLD: f64 = 2.0;
/// Zoom level at which the hint starts saying "close".
pub const CLOSE_THRESHOLD: f64 = 1.5;
/// Zoom change per wheel notch.
pub const WHEEL_STEP: f64 = 0.1;
/// Zoom change per keyboard press.
pub const KEY_STEP: f64 = 0.2;

/// The hidden-data record attached to a revealable illustration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiddenPayload {
    /// Asset shown before the reveal.
    pub source_asset: String,
    /// Asset swapped in once revealed.
    pub revealed_asset: String,
    /// Binary-encoded message.
    pub encoded_payload: String,
    /// Human-readable meaning shown alongside the decoded message.
    pub decoded_meaning: String,
}

impl HiddenPayload {
    /// The first gospel illustration.
    #[must_use]
    pub fn first_gospel() -> Self {
        Self {
            source_asset: "./assets/images/gospel-1-innocent.jpg".to_owned(),
            revealed_asset: "./assets/images/gospel-1-revealed.jpg".to_owned(),
            encoded_payload: binary::encode("GOP"),
            decoded_meaning: "GOP - 福音的启示".to_owned(),
        }
    }

    /// Decodes `encoded_payload`.
    ///
    /// # Errors
    ///
    /// Returns `BinaryError` if the payload is not valid binary text.
    pub fn decoded_text(&self) -> Result<String, BinaryError> {
        binary::decode(&self.encoded_payload)
    }
}

/// Hint tier shown under the illustration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomHint {
    /// Below 1.5.
    Normal,
    /// From 1.5 up to the reveal threshold.
    Close,
    /// At or past the reveal threshold.
    Revealed,
}

impl ZoomHint {
    /// The tier for `scale`.
    #[must_use]
    pub fn for_scale(scale: f64) -> Self {
        if scale >= REVEAL_THRESHOLD {
            Self::Revealed
        } else if scale >= CLOSE_THRESHOLD {
            Self::Close
        } else {
            Self::Normal
        }
    }

    /// Player-facing hint text.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Normal => "尝试缩放图像探索细节",
            Self::Close => "接近了...继续缩放",
            Self::Revealed => "真理已显现！",
        }
    }
}

/// What a zoom change did to the reveal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealChange {
    /// The threshold was crossed upwards.
    Revealed,
    /// The level dropped back below the threshold.
    Concealed,
    /// Nothing crossed.
    Unchanged,
}

/// Zoom state of one revealable illustration.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomReveal {
    scale: f64,
    revealed: bool,
}

impl Default for ZoomReveal {
    fn default() -> Self {
        Self {
            scale: 1.0,
            revealed: false,
        }
    }
}

impl ZoomReveal {
    /// Starts at 1.0, concealed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current (clamped) zoom level.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Whether the payload is currently shown.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Hint for the current level.
    #[must_use]
    pub fn hint(&self) -> ZoomHint {
        ZoomHint::for_scale(self.scale)
    }

    /// Sets the zoom level (clamped to `[0.5, 3.0]`). Non-finite levels are
    /// ignored.
    pub fn zoom_to(&mut self, level: f64) -> RevealChange {
        if !level.is_finite() {
            return RevealChange::Unchanged;
        }
        self.scale = level.clamp(MIN_ZOOM, MAX_ZOOM);
        let should_reveal = self.scale >= REVEAL_THRESHOLD;
        match (should_reveal, self.revealed) {
            (true, false) => {
                self.revealed = true;
                RevealChange::Revealed
            }
            (false, true) => {
                self.revealed = false;
                RevealChange::Concealed
            }
            _ => RevealChange::Unchanged,
        }
    }

    /// Adjusts the level by `delta`.
    pub fn zoom_by(&mut self, delta: f64) -> RevealChange {
        self.zoom_to(self.scale + delta)
    }

    /// Returns to 1.0.
    pub fn reset(&mut self) -> RevealChange {
        self.zoom_to(1.0)
    }
}
