//! Shared helpers for section integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use gop_content::application::library::ContentLibrary;
use gop_content::domain::config::GameConfig;
use gop_content::domain::scriptures::{GospelManuscript, LogicPuzzle, Scriptures};
use gop_core::rng::DeterministicRng;
use gop_core::storage::KeyValueStore;
use gop_progress::application::progress_store::ProgressStore;
use gop_sections::context::SectionContext;
use gop_sections::presenter::RecordingPresenter;
use gop_storage::MemoryStore;
use gop_test_support::{FixedClock, MockRng};

pub const CANONICAL: [&str; 4] = ["混沌即秩序", "噪音即真理", "一即是万", "传播即存在"];

/// A wired context plus handles to inspect what it did.
pub struct Harness {
    pub ctx: SectionContext,
    pub presenter: Arc<RecordingPresenter>,
    pub backend: Arc<MemoryStore>,
}

impl Harness {
    /// A context over `backend`, with scriptures loaded and default timing.
    pub fn over(backend: Arc<MemoryStore>) -> Self {
        Self::build(backend, Some(scriptures()))
    }

    /// A fresh profile.
    pub fn fresh() -> Self {
        Self::over(Arc::new(MemoryStore::new()))
    }

    /// A fresh profile with no content documents loaded.
    pub fn without_content() -> Self {
        Self::build(Arc::new(MemoryStore::new()), None)
    }

    /// A fresh profile over a custom scriptures document.
    pub fn with_scriptures(scriptures: Scriptures) -> Self {
        Self::build(Arc::new(MemoryStore::new()), Some(scriptures))
    }

    fn build(backend: Arc<MemoryStore>, scriptures: Option<Scriptures>) -> Self {
        let presenter = Arc::new(RecordingPresenter::new());
        let rng: Arc<Mutex<dyn DeterministicRng>> = Arc::new(Mutex::new(MockRng));
        let ctx = SectionContext::new(
            ProgressStore::open(backend.clone()),
            presenter.clone(),
            Arc::new(FixedClock::default()),
            rng,
            ContentLibrary::from_parts(scriptures, GameConfig::default()),
        );
        Self {
            ctx,
            presenter,
            backend,
        }
    }

    /// The raw stored value of a namespaced key.
    pub fn stored(&self, key: &str) -> Option<String> {
        self.backend.get(key).unwrap()
    }

    /// A second store over the same backend, as a later page load would see.
    pub fn reload(&self) -> ProgressStore {
        ProgressStore::open(self.backend.clone())
    }
}

pub fn scriptures() -> Scriptures {
    Scriptures {
        status_bar_messages: vec!["噪音即真理".to_owned()],
        logic_puzzle: LogicPuzzle {
            correct_order: CANONICAL.map(String::from).to_vec(),
            distractors: ["沉默即答案", "遗忘即永恒", "观察即改变"]
                .map(String::from)
                .to_vec(),
        },
        gospel_manuscripts: [(
            "volume1".to_owned(),
            GospelManuscript {
                title: "噪音福音 · 第一卷".to_owned(),
                passages: vec!["起初，是噪音。".to_owned()],
            },
        )]
        .into(),
    }
}

/// Lets paused time run forward by `delay` and gives woken tasks a chance to
/// finish.
pub async fn advance(delay: Duration) {
    tokio::time::sleep(delay).await;
    for _ in 0..3 {
        tokio::task::yield_now().await;
    }
}
