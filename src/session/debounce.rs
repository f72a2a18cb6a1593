use std::time::{Duration, Instant};

/// Collapses a burst of window resizes into the last one, released after the
/// window has been quiet for `quiet`.
#[derive(Clone, Debug)]
pub struct ResizeDebounce {
    quiet: Duration,
    pending: Option<(u32, u32, Instant)>,
}

impl ResizeDebounce {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Records a new size and restarts the quiet period.
    pub fn schedule(&mut self, width: u32, height: u32, now: Instant) {
        self.pending = Some((width, height, now + self.quiet));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, _, at)| at)
    }

    /// Time left until the pending size is due.
    pub fn timeout(&self, now: Instant) -> Option<Duration> {
        self.deadline().map(|at| at.saturating_duration_since(now))
    }

    /// The pending size, once its quiet period has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<(u32, u32)> {
        match self.pending {
            Some((w, h, at)) if now >= at => {
                self.pending = None;
                Some((w, h))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/debounce.rs"]
mod tests;
