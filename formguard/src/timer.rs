//! Deferred work.
//!
//! The engine never sleeps. Work that has to happen later is recorded here
//! with a deadline and run by [`Engine::tick`](crate::Engine::tick) once the
//! clock has passed it.

use std::time::Instant;

use crate::aggregator::RepaintPass;
use crate::registry::FieldId;

/// A one-shot task for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Task {
    /// Re-map the cursor after focus or a pointer press.
    RestoreCursor(FieldId),
    /// Forget an earlier required failure after a reset.
    ClearRequiredFailure(FieldId),
}

impl Task {
    fn field(&self) -> FieldId {
        match self {
            Task::RestoreCursor(id) | Task::ClearRequiredFailure(id) => *id,
        }
    }
}

/// The single repaint deadline plus the queue of one-shot tasks.
#[derive(Debug, Default)]
pub(crate) struct Timers {
    repaint: Option<Instant>,
    tasks: Vec<(Instant, Task)>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the repaint pass, replacing any pending one.
    pub fn schedule_repaint(&mut self, at: Instant) {
        if self.repaint.is_some() {
            log::trace!("[timer] repaint rescheduled");
        }
        self.repaint = Some(at);
    }

    pub fn repaint_pending(&self) -> bool {
        self.repaint.is_some()
    }

    pub fn defer(&mut self, at: Instant, task: Task) {
        log::trace!("[timer] deferred {:?}", task);
        self.tasks.push((at, task));
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks
            .iter()
            .map(|(at, _)| *at)
            .chain(self.repaint)
            .min()
    }

    /// Remove everything due at `now`.
    ///
    /// Tasks come back in deadline order; ties keep scheduling order.
    pub fn take_due(&mut self, now: Instant) -> (bool, Vec<Task>) {
        let repaint_due = self.repaint.is_some_and(|at| at <= now);
        if repaint_due {
            self.repaint = None;
        }

        let mut due: Vec<(Instant, Task)> = Vec::new();
        self.tasks.retain(|(at, task)| {
            if *at <= now {
                due.push((*at, *task));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(at, _)| *at);

        (repaint_due, due.into_iter().map(|(_, task)| task).collect())
    }

    /// Drop pending tasks of removed fields.
    pub fn cancel_fields(&mut self, fields: &[FieldId]) {
        self.tasks.retain(|(_, task)| !fields.contains(&task.field()));
    }
}

/// What a call to [`Engine::tick`](crate::Engine::tick) did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Set when the debounced repaint ran.
    pub repaint: Option<RepaintPass>,
    /// Number of one-shot tasks run.
    pub tasks_run: usize,
}
