//! Where each ending leaves the player.

use gop_progress::domain::progress::{Ending, Section};
use serde::Serialize;

/// Fade-out before the blind ending returns to the index.
pub const BLIND_FADE_MS: u64 = 2000;

/// The terminal screen for an ending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Landing {
    /// Fade to white, then navigate to `section` with `query`.
    Redirect {
        section: Section,
        query: String,
        delay_ms: u64,
    },
    /// Replace the chamber with the eternal sanctuary.
    Sanctuary {
        title: &'static str,
        message: &'static str,
        closing: &'static str,
    },
}

/// The landing for `ending`.
#[must_use]
pub fn landing(ending: Ending) -> Landing {
    match ending {
        Ending::Blind => Landing::Redirect {
            section: Section::Index,
            query: format!("ending={ending}"),
            delay_ms: BLIND_FADE_MS,
        },
        Ending::See => Landing::Sanctuary {
            title: "永恒真实之镜",
            message: "你选择了凝视真理。这个窗口将成为你窥视永恒的通道。",
            closing: "真理在此演化，永不停息...",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blind_returns_to_index() {
        assert_eq!(
            landing(Ending::Blind),
            Landing::Redirect {
                section: Section::Index,
                query: "ending=blind".to_owned(),
                delay_ms: 2000,
            }
        );
    }

    #[test]
    fn test_see_stays_in_sanctuary() {
        let json = serde_json::to_value(landing(Ending::See)).unwrap();

        assert_eq!(json["kind"], "sanctuary");
        assert_eq!(json["title"], "永恒真实之镜");
    }
}
