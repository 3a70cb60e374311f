//! The game config document.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level game config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub timing: Timing,
}

/// Delays used by the sections, in milliseconds. Any field missing from the
/// document keeps its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Timing {
    /// Status bar rotation period.
    pub status_bar_update: u64,
    /// Pause between a passed trial and the next stage.
    pub auto_advance: u64,
    /// Delay before the cross-dimension hint on the index.
    pub cross_dimension_hint_delay: u64,
    /// Delay before the add-to-home-screen hint on mobile.
    pub home_screen_hint_delay: u64,
    /// Pause between accepting the revelation and showing the manuscript.
    pub revelation_delay: u64,
    /// How long a custom status message stays up.
    pub status_hold: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            status_bar_update: 8000,
            auto_advance: 2000,
            cross_dimension_hint_delay: 30_000,
            home_screen_hint_delay: 60_000,
            revelation_delay: 2000,
            status_hold: 3000,
        }
    }
}

impl Timing {
    #[must_use]
    pub fn status_bar_update(&self) -> Duration {
        Duration::from_millis(self.status_bar_update)
    }

    #[must_use]
    pub fn auto_advance(&self) -> Duration {
        Duration::from_millis(self.auto_advance)
    }

    #[must_use]
    pub fn cross_dimension_hint_delay(&self) -> Duration {
        Duration::from_millis(self.cross_dimension_hint_delay)
    }

    #[must_use]
    pub fn home_screen_hint_delay(&self) -> Duration {
        Duration::from_millis(self.home_screen_hint_delay)
    }

    #[must_use]
    pub fn revelation_delay(&self) -> Duration {
        Duration::from_millis(self.revelation_delay)
    }

    #[must_use]
    pub fn status_hold(&self) -> Duration {
        Duration::from_millis(self.status_hold)
    }
}
