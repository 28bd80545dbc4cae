//! Timestamp-driven scheduling: trailing debounce and delayed commands.
//!
//! Nothing here owns a timer. Callers pass the current time (milliseconds)
//! and poll on every frame.

use crate::command::DomCommand;

/// Trailing-edge debounce.
///
/// Every [`Debouncer::trigger`] pushes the deadline back; [`Debouncer::poll`]
/// fires once after the input has been quiet for `wait_ms`.
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// Quiet period (milliseconds).
    wait_ms: f64,
    /// When the pending call fires, if one is pending.
    deadline: Option<f64>,
}

impl Debouncer {
    /// Creates an idle debouncer.
    #[must_use]
    pub const fn new(wait_ms: f64) -> Self {
        Self {
            wait_ms,
            deadline: None,
        }
    }

    /// Records an input at `now_ms`, restarting the quiet period.
    pub fn trigger(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.wait_ms);
    }

    /// Returns true exactly once when the quiet period has elapsed.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Returns true if a call is waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Drops the pending call.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

/// Commands held back until a timestamp.
#[derive(Debug, Clone, Default)]
pub struct DelayQueue {
    /// Pending entries, kept sorted by due time (stable for equal times).
    entries: Vec<(f64, DomCommand)>,
}

impl DelayQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `command` for `due_ms`.
    pub fn schedule(&mut self, due_ms: f64, command: DomCommand) {
        let index = self.entries.partition_point(|(due, _)| *due <= due_ms);
        self.entries.insert(index, (due_ms, command));
    }

    /// Removes and returns every command due at `now_ms`, in due order.
    pub fn drain_due(&mut self, now_ms: f64) -> impl Iterator<Item = DomCommand> + '_ {
        let ready = self.entries.partition_point(|(due, _)| *due <= now_ms);
        self.entries.drain(..ready).map(|(_, command)| command)
    }

    /// Returns the number of pending commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every pending command.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
