//! Section controllers, one per page.

pub mod gospel;
pub mod index;
pub mod quarantine;

use gop_progress::application::command_handlers::enter_section;
use gop_progress::domain::progress::Section;
use tracing::info;
use uuid::Uuid;

use crate::context::SectionContext;
use crate::presenter::ViewUpdate;

/// Records entry into `section` and announces it. Returns the visit id used
/// to correlate this visit's log lines.
fn enter(ctx: &SectionContext, section: Section) -> Uuid {
    let visit_id = Uuid::now_v7();
    let persisted = enter_section(&mut ctx.store(), section);
    info!(section = %section, visit = %visit_id, persisted, "section entered");
    ctx.render(ViewUpdate::SectionEntered { section, visit_id });
    visit_id
}
