//! The gospel manuscript: the revelation question and the zoom reveal.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use gop_content::domain::scriptures::DEFAULT_VOLUME;
use gop_progress::application::command_handlers::{ProgressFlag, collect_beacon, raise_flag};
use gop_progress::domain::progress::{BeaconId, Section};
use gop_trials::domain::reveal::{HiddenPayload, RevealChange, ZoomReveal};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::context::SectionContext;
use crate::presenter::ViewUpdate;
use crate::scope::SectionScope;

const ACCEPTED_STATUS: &str = "认知之门已开启，欢迎见证者";
const ACCEPTED_HOLD_MS: u64 = 4000;
const DENIED_STATUS: &str = "真理会等待，直到你准备好";
const REVEALED_PREFIX: &str = "第一圣言已揭示: ";
const REVEALED_HOLD_MS: u64 = 5000;

/// One visit to the gospel page.
#[derive(Debug)]
pub struct GospelSection {
    ctx: SectionContext,
    scope: SectionScope,
    visit_id: Uuid,
    payload: HiddenPayload,
    reveal: ZoomReveal,
    revelation_pending: Arc<AtomicBool>,
}

impl GospelSection {
    /// Enters the page with the first gospel illustration.
    pub fn enter(ctx: SectionContext) -> Self {
        Self::enter_with_payload(ctx, HiddenPayload::first_gospel())
    }

    /// Enters the page with a specific illustration payload.
    pub fn enter_with_payload(ctx: SectionContext, payload: HiddenPayload) -> Self {
        let visit_id = super::enter(&ctx, Section::Gospel);
        if ctx.store().load().has_accepted_revelation {
            show_manuscript(&ctx);
        } else {
            ctx.render(ViewUpdate::RevelationPrompt);
        }
        ctx.refresh_gate();

        Self {
            ctx,
            scope: SectionScope::new(Section::Gospel),
            visit_id,
            payload,
            reveal: ZoomReveal::new(),
            revelation_pending: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Accepts the revelation. The manuscript appears after the revelation
    /// delay. Returns `false` if it was already accepted or is on its way.
    #[instrument(skip(self), fields(visit = %self.visit_id))]
    pub fn accept_revelation(&mut self) -> bool {
        if self.ctx.store().load().has_accepted_revelation
            || self.revelation_pending.swap(true, Ordering::SeqCst)
        {
            return false;
        }

        let ctx = self.ctx.clone();
        let pending = Arc::clone(&self.revelation_pending);
        let scheduled = self
            .scope
            .schedule(self.ctx.timing().revelation_delay(), move || {
                raise_flag(&mut ctx.store(), ProgressFlag::AcceptedRevelation);
                show_manuscript(&ctx);
                ctx.status(ACCEPTED_STATUS, ACCEPTED_HOLD_MS);
                pending.store(false, Ordering::SeqCst);
                info!("revelation accepted");
            });
        if !scheduled {
            self.revelation_pending.store(false, Ordering::SeqCst);
        }
        scheduled
    }

    /// Declines the revelation for now.
    pub fn deny_revelation(&self) {
        self.ctx.status(DENIED_STATUS, self.ctx.timing().status_hold);
    }

    /// Feeds a normalized zoom level from the gesture layer.
    #[instrument(skip(self), fields(visit = %self.visit_id))]
    pub fn on_zoom(&mut self, level: f64) -> RevealChange {
        let change = self.reveal.zoom_to(level);
        self.after_zoom(change);
        change
    }

    /// Adjusts the zoom by a wheel notch or key press.
    pub fn nudge_zoom(&mut self, delta: f64) -> RevealChange {
        let change = self.reveal.zoom_by(delta);
        self.after_zoom(change);
        change
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.reveal.is_revealed()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scope.pending()
    }

    /// Leaves the page, cancelling a pending revelation.
    pub fn leave(mut self) {
        self.scope.close();
    }

    fn after_zoom(&mut self, change: RevealChange) {
        self.ctx.render(ViewUpdate::Zoom {
            scale: self.reveal.scale(),
            hint: self.reveal.hint(),
        });
        match change {
            RevealChange::Revealed => self.on_revealed(),
            RevealChange::Concealed => self.ctx.render(ViewUpdate::PayloadConcealed),
            RevealChange::Unchanged => {}
        }
    }

    fn on_revealed(&mut self) {
        let decoded = self.payload.decoded_text().unwrap_or_else(|e| {
            warn!(error = %e, "hidden payload does not decode");
            String::new()
        });
        self.ctx.render(ViewUpdate::PayloadRevealed {
            payload: self.payload.clone(),
            decoded: decoded.clone(),
        });
        self.ctx
            .status(format!("{REVEALED_PREFIX}{decoded}"), REVEALED_HOLD_MS);

        let collected = collect_beacon(&mut self.ctx.store(), BeaconId::BinaryRevelation);
        if collected.changed {
            self.ctx.refresh_gate();
        }
    }
}

fn show_manuscript(ctx: &SectionContext) {
    ctx.render(ViewUpdate::Manuscript {
        manuscript: ctx.content.gospel(DEFAULT_VOLUME).cloned(),
    });
}
