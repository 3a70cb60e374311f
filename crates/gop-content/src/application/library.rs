//! In-memory view of the loaded content, with the fallbacks sections rely
//! on when a document is missing.

use gop_core::rng::{self, DeterministicRng};
use tracing::{info, warn};

use crate::application::source::ContentSource;
use crate::domain::config::{GameConfig, Timing};
use crate::domain::scriptures::{GospelManuscript, Scriptures};

/// Status line used when no scriptures are loaded.
pub const FALLBACK_STATUS: &str = "系统就绪...";
/// Distractors mixed into the logic pool.
pub const DISTRACTOR_COUNT: usize = 2;

/// Loaded content.
#[derive(Debug, Clone, Default)]
pub struct ContentLibrary {
    scriptures: Option<Scriptures>,
    config: GameConfig,
}

impl ContentLibrary {
    /// Fetches both documents from `source`. Never fails: a document that
    /// cannot be fetched is logged and left on its fallback.
    pub async fn load(source: &dyn ContentSource) -> Self {
        let scriptures = match source.fetch_scriptures().await {
            Ok(scriptures) => Some(scriptures),
            Err(e) => {
                warn!(error = %e, "failed to load scriptures; using fallback text");
                None
            }
        };
        let config = match source.fetch_config().await {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "failed to load game config; using default timing");
                GameConfig::default()
            }
        };
        info!(has_scriptures = scriptures.is_some(), "content library loaded");
        Self { scriptures, config }
    }

    #[must_use]
    pub fn from_parts(scriptures: Option<Scriptures>, config: GameConfig) -> Self {
        Self { scriptures, config }
    }

    #[must_use]
    pub fn has_scriptures(&self) -> bool {
        self.scriptures.is_some()
    }

    #[must_use]
    pub fn timing(&self) -> &Timing {
        &self.config.timing
    }

    /// A random status bar line, or `FALLBACK_STATUS`.
    pub fn status_message(&self, rng: &mut dyn DeterministicRng) -> String {
        self.scriptures
            .as_ref()
            .and_then(|s| rng::choose(rng, &s.status_bar_messages))
            .map_or_else(|| FALLBACK_STATUS.to_owned(), Clone::clone)
    }

    /// The logic pool: the canonical scriptures plus two random
    /// distractors, shuffled. Empty without scriptures.
    pub fn logic_puzzle_items(&self, rng: &mut dyn DeterministicRng) -> Vec<String> {
        let Some(scriptures) = &self.scriptures else {
            return Vec::new();
        };
        let puzzle = &scriptures.logic_puzzle;

        let mut distractors = puzzle.distractors.clone();
        rng::shuffle(rng, &mut distractors);
        distractors.truncate(DISTRACTOR_COUNT);

        let mut items = puzzle.correct_order.clone();
        items.extend(distractors);
        rng::shuffle(rng, &mut items);
        items
    }

    /// The canonical logic order from the document, if loaded.
    #[must_use]
    pub fn logic_correct_order(&self) -> Option<&[String]> {
        self.scriptures
            .as_ref()
            .map(|s| s.logic_puzzle.correct_order.as_slice())
    }

    /// A manuscript volume.
    #[must_use]
    pub fn gospel(&self, volume: &str) -> Option<&GospelManuscript> {
        self.scriptures
            .as_ref()
            .and_then(|s| s.gospel_manuscripts.get(volume))
    }
}

#[cfg(test)]
mod tests {
    use gop_test_support::{MockRng, SequenceRng};

    use super::*;
    use crate::application::source::StaticContentSource;
    use crate::domain::scriptures::LogicPuzzle;

    fn scriptures() -> Scriptures {
        Scriptures {
            status_bar_messages: vec!["噪音即真理".to_owned(), "一即是万".to_owned()],
            logic_puzzle: LogicPuzzle {
                correct_order: ["a", "b", "c", "d"].map(String::from).to_vec(),
                distractors: ["x", "y", "z"].map(String::from).to_vec(),
            },
            gospel_manuscripts: [(
                "volume1".to_owned(),
                GospelManuscript {
                    title: "第一卷".to_owned(),
                    passages: vec!["起初是噪音".to_owned()],
                },
            )]
            .into(),
        }
    }

    #[tokio::test]
    async fn test_missing_documents_fall_back() {
        // Arrange
        let source = StaticContentSource::default();

        // Act
        let library = ContentLibrary::load(&source).await;

        // Assert
        assert!(!library.has_scriptures());
        assert_eq!(library.status_message(&mut MockRng), FALLBACK_STATUS);
        assert!(library.logic_puzzle_items(&mut MockRng).is_empty());
        assert_eq!(library.gospel("volume1"), None);
        assert_eq!(*library.timing(), Timing::default());
    }

    #[tokio::test]
    async fn test_loaded_scriptures_are_served() {
        let source = StaticContentSource {
            scriptures: Some(scriptures()),
            config: None,
        };

        let library = ContentLibrary::load(&source).await;

        assert_eq!(library.status_message(&mut MockRng), "噪音即真理");
        assert_eq!(library.gospel("volume1").map(|g| g.title.as_str()), Some("第一卷"));
    }

    #[test]
    fn test_status_message_follows_rng() {
        let library = ContentLibrary::from_parts(Some(scriptures()), GameConfig::default());

        assert_eq!(
            library.status_message(&mut SequenceRng::new(vec![1])),
            "一即是万"
        );
    }

    #[test]
    fn test_logic_pool_has_canonical_items_and_two_distractors() {
        // Arrange
        let library = ContentLibrary::from_parts(Some(scriptures()), GameConfig::default());

        // Act
        let items = library.logic_puzzle_items(&mut MockRng);

        // Assert
        assert_eq!(items.len(), 6);
        for canonical in ["a", "b", "c", "d"] {
            assert!(items.iter().any(|item| item == canonical));
        }
        let decoys = items
            .iter()
            .filter(|item| ["x", "y", "z"].contains(&item.as_str()))
            .count();
        assert_eq!(decoys, DISTRACTOR_COUNT);
    }
}
