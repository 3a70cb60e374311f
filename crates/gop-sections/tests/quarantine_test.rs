//! Integration tests for the quarantine section.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{CANONICAL, Harness, advance, scriptures};
use gop_core::error::DomainError;
use gop_gate::domain::landing::Landing;
use gop_progress::application::progress_store::{ProgressStore, StorageKey};
use gop_progress::domain::progress::{BeaconId, Ending, ProgressPatch, Section};
use gop_sections::presenter::ViewUpdate;
use gop_sections::sections::quarantine::QuarantineSection;
use gop_storage::MemoryStore;
use gop_test_support::fixed_instant;
use gop_trials::domain::flow::TrialStage;
use gop_trials::domain::outcome::TrialKind;

const WIDE: u32 = 1280;

fn stage_rendered(harness: &Harness, stage: TrialStage) -> bool {
    harness
        .presenter
        .saw(|u| *u == ViewUpdate::Stage { stage })
}

fn place_canonical(section: &mut QuarantineSection) {
    for (slot, item) in CANONICAL.iter().enumerate() {
        assert!(section.place(item, slot), "{item} should fit slot {slot}");
    }
}

#[tokio::test(start_paused = true)]
async fn test_fresh_visit_starts_at_visual_with_six_item_pool() {
    let harness = Harness::fresh();

    let section = QuarantineSection::enter(harness.ctx.clone(), WIDE);

    assert_eq!(section.stage(), TrialStage::Visual);
    assert_eq!(section.board().pool().len(), 6);
    assert_eq!(harness.reload().load().current_section, Section::Quarantine);
}

#[tokio::test(start_paused = true)]
async fn test_missing_content_falls_back_to_builtin_board() {
    let harness = Harness::without_content();

    let section = QuarantineSection::enter(harness.ctx.clone(), WIDE);

    assert_eq!(section.board().pool().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_empty_correct_order_falls_back_to_builtin_board() {
    // Arrange
    let mut document = scriptures();
    document.logic_puzzle.correct_order.clear();
    let harness = Harness::with_scriptures(document);
    let mut section = QuarantineSection::enter(harness.ctx.clone(), WIDE);

    // Act
    let report = section.check_logic().unwrap();

    // Assert
    assert_eq!(section.board().slots().len(), 4);
    assert_eq!(section.board().pool().len(), 4);
    assert!(!report.outcome.passed);
    assert!(!harness.reload().load().has_beacon(BeaconId::LogicBeacon));
}

#[tokio::test(start_paused = true)]
async fn test_visual_trial_fires_once_and_advances_after_delay() {
    // Arrange
    let harness = Harness::fresh();
    let mut section = QuarantineSection::enter(harness.ctx.clone(), WIDE);

    // Act
    let first = section.on_resize(800);
    let second = section.on_resize(850);
    advance(Duration::from_millis(1999)).await;
    let early = stage_rendered(&harness, TrialStage::Data);
    advance(Duration::from_millis(2)).await;

    // Assert
    assert!(first.is_some_and(|r| r.outcome.passed));
    assert!(second.is_none());
    assert!(!early);
    assert!(stage_rendered(&harness, TrialStage::Data));
    assert_eq!(section.stage(), TrialStage::Data);
    assert!(
        harness
            .presenter
            .saw(|u| *u == ViewUpdate::TrialMarkerLit { trial: TrialKind::Visual })
    );
}

#[tokio::test(start_paused = true)]
async fn test_entering_inside_the_window_passes_visual_immediately() {
    let harness = Harness::fresh();

    let section = QuarantineSection::enter(harness.ctx.clone(), 768);

    assert_eq!(section.stage(), TrialStage::Data);
    assert!(
        harness
            .reload()
            .load()
            .has_beacon(BeaconId::VisualBeacon)
    );
}

#[tokio::test(start_paused = true)]
async fn test_wrong_belief_fails_with_feedback() {
    let harness = Harness::fresh();
    let mut section = QuarantineSection::enter(harness.ctx.clone(), WIDE);

    let report = section.submit_belief("i see").unwrap();

    assert!(!report.outcome.passed);
    assert_eq!(harness.presenter.statuses(), vec!["认知修正失败，请重新尝试"]);
    assert_eq!(harness.reload().load().beacon_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_incomplete_board_keeps_placements() {
    let harness = Harness::fresh();
    let mut section = QuarantineSection::enter(harness.ctx.clone(), WIDE);
    section.place(CANONICAL[0], 0);

    let report = section.check_logic().unwrap();

    assert!(!report.outcome.passed);
    assert_eq!(section.board().slots()[0].as_deref(), Some(CANONICAL[0]));
    assert_eq!(harness.presenter.statuses(), vec!["请完成所有箴言的排序"]);
}

#[tokio::test(start_paused = true)]
async fn test_misordered_board_is_reset() {
    // Arrange
    let harness = Harness::fresh();
    let mut section = QuarantineSection::enter(harness.ctx.clone(), WIDE);
    for (slot, item) in CANONICAL.iter().rev().enumerate() {
        section.place(item, slot);
    }

    // Act
    let report = section.check_logic().unwrap();

    // Assert
    assert!(!report.outcome.passed);
    assert!(section.board().slots().iter().all(Option::is_none));
    assert_eq!(section.board().pool().len(), 6);
    assert_eq!(harness.presenter.statuses(), vec!["逻辑序列错误，请重新排列"]);
}

#[tokio::test(start_paused = true)]
async fn test_withdraw_returns_item_to_pool() {
    let harness = Harness::fresh();
    let mut section = QuarantineSection::enter(harness.ctx.clone(), WIDE);
    section.place(CANONICAL[2], 1);

    let item = section.withdraw(1);

    assert_eq!(item.as_deref(), Some(CANONICAL[2]));
    assert!(section.withdraw(1).is_none());
    assert_eq!(section.board().pool().len(), 6);
}

#[tokio::test(start_paused = true)]
async fn test_ending_before_final_decision_is_rejected() {
    let harness = Harness::fresh();
    let mut section = QuarantineSection::enter(harness.ctx.clone(), WIDE);

    let result = section.choose_ending(Ending::See);

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert_eq!(harness.reload().load().ending_chosen, None);
}

#[tokio::test(start_paused = true)]
async fn test_full_run_to_see_ending() {
    // Arrange
    let harness = Harness::fresh();
    let mut section = QuarantineSection::enter(harness.ctx.clone(), WIDE);

    // Act
    section.on_resize(900);
    section.submit_belief(" \"See\" ").unwrap();
    place_canonical(&mut section);
    let logic = section.check_logic().unwrap();
    advance(Duration::from_secs(3)).await;
    let chosen = section.choose_ending(Ending::See).unwrap();

    // Assert
    assert_eq!(logic.advanced_to, Some(TrialStage::FinalDecision));
    assert!(stage_rendered(&harness, TrialStage::FinalDecision));
    assert!(chosen.changed);
    assert!(chosen.persisted);
    assert_eq!(section.stage(), TrialStage::Ending(Ending::See));
    assert!(harness.presenter.saw(|u| matches!(
        u,
        ViewUpdate::Landing {
            landing: Landing::Sanctuary { .. }
        }
    )));

    let stored = harness.reload().load();
    assert_eq!(stored.beacon_count(), 3);
    assert_eq!(stored.ending_chosen, Some(Ending::See));
    assert_eq!(stored.completion_timestamp, Some(fixed_instant()));
    assert_eq!(
        harness.stored(&StorageKey::EndingChosen.namespaced()).as_deref(),
        Some("\"see\"")
    );
}

#[tokio::test(start_paused = true)]
async fn test_blind_ending_navigates_to_index_after_fade() {
    // Arrange
    let backend = Arc::new(MemoryStore::new());
    ProgressStore::open(backend.clone()).save(ProgressPatch::beacons(
        [
            BeaconId::VisualBeacon,
            BeaconId::DataBeacon,
            BeaconId::LogicBeacon,
        ]
        .into(),
    ));
    let harness = Harness::over(backend);
    let mut section = QuarantineSection::enter(harness.ctx.clone(), WIDE);
    assert_eq!(section.stage(), TrialStage::FinalDecision);

    // Act
    section.choose_ending(Ending::Blind).unwrap();
    advance(Duration::from_millis(2001)).await;

    // Assert
    assert!(harness.presenter.saw(|u| *u
        == ViewUpdate::Navigate {
            section: Section::Index,
            query: "ending=blind".to_owned(),
        }));
}

#[tokio::test(start_paused = true)]
async fn test_returning_after_ending_is_terminal() {
    // Arrange
    let backend = Arc::new(MemoryStore::new());
    ProgressStore::open(backend.clone()).record_ending(Ending::Blind, fixed_instant());
    let harness = Harness::over(backend);

    // Act
    let mut section = QuarantineSection::enter(harness.ctx.clone(), 800);

    // Assert
    assert_eq!(section.stage(), TrialStage::Ending(Ending::Blind));
    assert!(harness.presenter.saw(|u| matches!(
        u,
        ViewUpdate::Landing {
            landing: Landing::Redirect { .. }
        }
    )));
    assert!(matches!(
        section.submit_belief("see"),
        Err(DomainError::Terminal)
    ));
    assert!(matches!(section.check_logic(), Err(DomainError::Terminal)));
    assert!(matches!(
        section.choose_ending(Ending::See),
        Err(DomainError::Terminal)
    ));
    assert_eq!(harness.reload().load().beacon_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_leaving_cancels_pending_stage_change() {
    let harness = Harness::fresh();
    let mut section = QuarantineSection::enter(harness.ctx.clone(), WIDE);
    section.submit_belief("see").unwrap();

    section.leave();
    advance(Duration::from_secs(5)).await;

    assert!(!stage_rendered(&harness, TrialStage::Logic));
    assert!(harness.reload().load().has_beacon(BeaconId::DataBeacon));
}
