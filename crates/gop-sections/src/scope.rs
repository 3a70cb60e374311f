//! Section-scoped timers.
//!
//! Every delayed effect a section schedules (hints, auto-advance, the
//! revelation pause) is a task owned by the section's `SectionScope`.
//! Closing or dropping the scope aborts whatever has not fired yet, so
//! leaving a section never lets its timers touch the next one.

use std::time::Duration;

use gop_progress::domain::progress::Section;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Cancellable delayed tasks tied to one section visit.
#[derive(Debug)]
pub struct SectionScope {
    section: Section,
    tasks: Vec<JoinHandle<()>>,
    closed: bool,
}

impl SectionScope {
    #[must_use]
    pub fn new(section: Section) -> Self {
        Self {
            section,
            tasks: Vec::new(),
            closed: false,
        }
    }

    /// Runs `task` after `delay` unless the scope closes first.
    ///
    /// Returns `false` without scheduling if the scope is closed or there is
    /// no Tokio runtime on this thread.
    pub fn schedule<F>(&mut self, delay: Duration, task: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        if self.closed {
            debug!(section = %self.section, "scope closed; timer dropped");
            return false;
        }
        let Ok(runtime) = Handle::try_current() else {
            warn!(section = %self.section, ?delay, "no async runtime; timer skipped");
            return false;
        };

        self.tasks.retain(|handle| !handle.is_finished());
        self.tasks.push(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        }));
        true
    }

    /// Timers scheduled and not yet fired.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|handle| !handle.is_finished()).count()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Aborts every outstanding timer. Further `schedule` calls are refused.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        let aborted = self.pending();
        for handle in self.tasks.drain(..) {
            handle.abort();
        }
        self.closed = true;
        debug!(section = %self.section, aborted, "section scope closed");
    }
}

impl Drop for SectionScope {
    fn drop(&mut self) {
        self.close();
    }
}
