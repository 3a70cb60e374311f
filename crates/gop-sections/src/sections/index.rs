//! The archive index: two delayed hints and the debug dump.

use gop_progress::application::command_handlers::{ProgressFlag, raise_flag};
use gop_progress::domain::progress::{Progress, Section};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::context::SectionContext;
use crate::presenter::ViewUpdate;
use crate::scope::SectionScope;

const MOBILE_AGENTS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

const WITNESSED_STATUS: &str = "跨维度连接已验证";
const WELCOME_BACK_STATUS: &str = "欢迎回到新视界档案馆";
const WELCOME_BACK_HOLD_MS: u64 = 2000;
const DEBUG_STATUS: &str = "调试信息已输出至控制台";

/// Whether `user_agent` looks like a phone or tablet.
#[must_use]
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let agent = user_agent.to_ascii_lowercase();
    MOBILE_AGENTS.iter().any(|marker| agent.contains(marker))
}

/// One visit to the index.
#[derive(Debug)]
pub struct IndexSection {
    ctx: SectionContext,
    scope: SectionScope,
    visit_id: Uuid,
}

impl IndexSection {
    /// Enters the index and schedules whichever hints are still due.
    pub fn enter(ctx: SectionContext, user_agent: &str) -> Self {
        let visit_id = super::enter(&ctx, Section::Index);
        let progress = ctx.store().load();
        let timing = ctx.timing();
        let mut scope = SectionScope::new(Section::Index);

        if !progress.has_witnessed_cross_dimension {
            let task_ctx = ctx.clone();
            scope.schedule(timing.cross_dimension_hint_delay(), move || {
                if !task_ctx.store().load().has_witnessed_cross_dimension {
                    task_ctx.render(ViewUpdate::CrossDimensionHint { visible: true });
                }
            });
        }

        if is_mobile_user_agent(user_agent) && !progress.has_added_to_home_screen {
            let task_ctx = ctx.clone();
            scope.schedule(timing.home_screen_hint_delay(), move || {
                if !task_ctx.store().load().has_added_to_home_screen {
                    task_ctx.render(ViewUpdate::HomeScreenHint { visible: true });
                }
            });
        }

        debug!(visit = %visit_id, timers = scope.pending(), "index hints scheduled");
        Self {
            ctx,
            scope,
            visit_id,
        }
    }

    /// Confirms the cross-dimension hint. Returns whether the flag was new.
    #[instrument(skip(self), fields(visit = %self.visit_id))]
    pub fn witness_cross_dimension(&mut self) -> bool {
        let raised = raise_flag(&mut self.ctx.store(), ProgressFlag::WitnessedCrossDimension);
        self.ctx
            .render(ViewUpdate::CrossDimensionHint { visible: false });
        self.ctx
            .status(WITNESSED_STATUS, self.ctx.timing().status_hold);
        raised
    }

    /// Dismisses the add-to-home-screen hint for good.
    #[instrument(skip(self), fields(visit = %self.visit_id))]
    pub fn dismiss_home_screen_hint(&mut self) -> bool {
        let raised = raise_flag(&mut self.ctx.store(), ProgressFlag::AddedToHomeScreen);
        self.ctx.render(ViewUpdate::HomeScreenHint { visible: false });
        raised
    }

    /// The page became visible again.
    pub fn on_visibility_regained(&self) {
        if self.ctx.store().load().has_witnessed_cross_dimension {
            self.ctx.status(WELCOME_BACK_STATUS, WELCOME_BACK_HOLD_MS);
        }
    }

    /// Dumps the current record to the log and the presenter.
    #[instrument(skip(self), fields(visit = %self.visit_id))]
    pub fn debug_snapshot(&self) -> Progress {
        let progress = self.ctx.store().load();
        info!(progress = ?progress, "progress snapshot");
        self.ctx.render(ViewUpdate::DebugSnapshot {
            progress: progress.clone(),
        });
        self.ctx.status(DEBUG_STATUS, self.ctx.timing().status_hold);
        progress
    }

    /// Timers still waiting to fire.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scope.pending()
    }

    /// Leaves the index, cancelling its timers.
    pub fn leave(mut self) {
        self.scope.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_user_agents() {
        assert!(is_mobile_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"
        ));
        assert!(is_mobile_user_agent("Mozilla/5.0 (Linux; Android 14; Pixel 8)"));
        assert!(is_mobile_user_agent("Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)"));
        assert!(!is_mobile_user_agent(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
        ));
    }
}
