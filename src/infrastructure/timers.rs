use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::application::TimerKind;

/// Pending deadlines, at most one per [`TimerKind`].
#[derive(Debug, Default)]
pub struct Timers {
    deadlines: HashMap<TimerKind, Instant>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms `kind` to fire at `at`, replacing any earlier deadline for it.
    pub fn schedule(&mut self, kind: TimerKind, at: Instant) {
        self.deadlines.insert(kind, at);
    }

    /// Removes and returns every timer whose deadline is at or before `now`.
    pub fn due(&mut self, now: Instant) -> Vec<TimerKind> {
        let fired: Vec<TimerKind> = self
            .deadlines
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(kind, _)| *kind)
            .collect();
        for kind in &fired {
            self.deadlines.remove(kind);
        }
        fired
    }

    /// Time until the earliest deadline, if any.
    pub fn next_in(&self, now: Instant) -> Option<Duration> {
        self.deadlines
            .values()
            .min()
            .map(|at| at.saturating_duration_since(now))
    }
}
