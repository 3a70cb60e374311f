//! The quarantine chamber: three trials, then the final decision.

use std::time::Duration;

use gop_core::error::DomainError;
use gop_gate::application::command_handlers::{EndingChosen, handle_choose_ending};
use gop_gate::domain::landing::{self, Landing};
use gop_progress::domain::progress::{Ending, Section};
use gop_trials::application::command_handlers::{TrialReport, record_outcome};
use gop_trials::application::query_handlers::collected_trials;
use gop_trials::domain::data;
use gop_trials::domain::flow::{QuarantineFlow, TrialStage};
use gop_trials::domain::logic::{CANONICAL_ORDER, LogicBoard};
use gop_trials::domain::outcome::TrialOutcome;
use gop_trials::domain::visual::VisualLatch;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::context::SectionContext;
use crate::presenter::ViewUpdate;
use crate::scope::SectionScope;

const FAILURE_HOLD_MS: u64 = 2000;

/// One visit to the quarantine chamber.
#[derive(Debug)]
pub struct QuarantineSection {
    ctx: SectionContext,
    scope: SectionScope,
    visit_id: Uuid,
    flow: QuarantineFlow,
    latch: VisualLatch,
    board: LogicBoard,
}

impl QuarantineSection {
    /// Enters the chamber, resuming the flow from stored progress, and runs
    /// the first viewport check.
    pub fn enter(ctx: SectionContext, viewport_width: u32) -> Self {
        let visit_id = super::enter(&ctx, Section::Quarantine);
        let progress = ctx.store().load();
        let flow = QuarantineFlow::resume(&progress);

        for trial in collected_trials(&progress) {
            ctx.render(ViewUpdate::TrialMarkerLit { trial });
        }
        ctx.render(ViewUpdate::Stage { stage: flow.stage() });
        if let TrialStage::Ending(ending) = flow.stage() {
            ctx.render(ViewUpdate::Landing {
                landing: landing::landing(ending),
            });
        }

        let board = build_board(&ctx);
        ctx.render(board_view(&board));

        let mut section = Self {
            ctx,
            scope: SectionScope::new(Section::Quarantine),
            visit_id,
            flow,
            latch: VisualLatch::new(),
            board,
        };
        section.on_resize(viewport_width);
        section
    }

    #[must_use]
    pub fn stage(&self) -> TrialStage {
        self.flow.stage()
    }

    #[must_use]
    pub fn board(&self) -> &LogicBoard {
        &self.board
    }

    /// Observes a viewport width. The visual trial passes the first time the
    /// width lands in its window; after an ending nothing is recorded.
    #[instrument(skip(self), fields(visit = %self.visit_id))]
    pub fn on_resize(&mut self, width: u32) -> Option<TrialReport> {
        if self.flow.is_terminal() {
            return None;
        }
        let outcome = self.latch.observe(width)?;
        self.record(outcome).ok()
    }

    /// Submits the corrected belief.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Terminal` once an ending has been chosen.
    #[instrument(skip(self), fields(visit = %self.visit_id))]
    pub fn submit_belief(&mut self, input: &str) -> Result<TrialReport, DomainError> {
        self.record(data::validate(input))
    }

    /// Drops `item` from the pool into `slot`.
    pub fn place(&mut self, item: &str, slot: usize) -> bool {
        let placed = self.board.place(item, slot);
        if placed {
            self.ctx.render(board_view(&self.board));
        } else {
            debug!(item, slot, "placement refused");
        }
        placed
    }

    /// Returns the item in `slot` to the pool.
    pub fn withdraw(&mut self, slot: usize) -> Option<String> {
        let item = self.board.withdraw(slot)?;
        self.ctx.render(board_view(&self.board));
        Some(item)
    }

    /// Checks the board. A full but misordered board is sent back to the
    /// pool.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Terminal` once an ending has been chosen.
    #[instrument(skip(self), fields(visit = %self.visit_id))]
    pub fn check_logic(&mut self) -> Result<TrialReport, DomainError> {
        if self.flow.is_terminal() {
            return Err(DomainError::Terminal);
        }
        let outcome = self.board.check();
        self.ctx.render(board_view(&self.board));
        self.record(outcome)
    }

    /// Takes the final decision.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` before the final decision is
    /// reached and `DomainError::Terminal` after an ending was chosen.
    #[instrument(skip(self), fields(visit = %self.visit_id))]
    pub fn choose_ending(&mut self, ending: Ending) -> Result<EndingChosen, DomainError> {
        let stage = self.flow.choose_ending(ending)?;
        let chosen = handle_choose_ending(&mut self.ctx.store(), ending, self.ctx.clock.as_ref());
        info!(ending = %ending, persisted = chosen.persisted, "final decision taken");

        self.ctx.render(ViewUpdate::Stage { stage });
        let landing = landing::landing(ending);
        self.ctx.render(ViewUpdate::Landing {
            landing: landing.clone(),
        });
        if let Landing::Redirect {
            section,
            query,
            delay_ms,
        } = landing
        {
            let ctx = self.ctx.clone();
            self.scope.schedule(Duration::from_millis(delay_ms), move || {
                ctx.render(ViewUpdate::Navigate { section, query });
            });
        }
        Ok(chosen)
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scope.pending()
    }

    /// Leaves the chamber, cancelling pending transitions.
    pub fn leave(mut self) {
        self.scope.close();
    }

    fn record(&mut self, outcome: TrialOutcome) -> Result<TrialReport, DomainError> {
        let report = record_outcome(&mut self.ctx.store(), &mut self.flow, outcome)?;

        if let Some(feedback) = outcome.feedback {
            self.ctx.render(ViewUpdate::TrialFeedback {
                outcome,
                message: feedback.message(),
            });
            let hold = if outcome.passed {
                self.ctx.timing().status_hold
            } else {
                FAILURE_HOLD_MS
            };
            self.ctx.status(feedback.message(), hold);
        }

        if report.collected.is_some_and(|c| c.changed) {
            self.ctx.render(ViewUpdate::TrialMarkerLit {
                trial: outcome.trial,
            });
        }

        if let Some(stage) = report.advanced_to {
            let ctx = self.ctx.clone();
            self.scope
                .schedule(self.ctx.timing().auto_advance(), move || {
                    ctx.render(ViewUpdate::Stage { stage });
                });
        }
        Ok(report)
    }
}

fn build_board(ctx: &SectionContext) -> LogicBoard {
    let pool = ctx.content.logic_puzzle_items(&mut *ctx.rng());
    match ctx.content.logic_correct_order() {
        Some(canonical) if !canonical.is_empty() && !pool.is_empty() => {
            LogicBoard::new(canonical.to_vec(), pool)
        }
        _ => {
            debug!(canonical = ?CANONICAL_ORDER, "no usable logic puzzle in scriptures; using the built-in board");
            LogicBoard::standard()
        }
    }
}

fn board_view(board: &LogicBoard) -> ViewUpdate {
    ViewUpdate::LogicBoard {
        pool: board.pool().to_vec(),
        slots: board.slots().to_vec(),
    }
}
