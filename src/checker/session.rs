//! Transient cycling state for the suggestion menu.

use crate::checker::resolver::closest_word;
use crate::{MisspelledWord, Position};
use std::time::{Duration, Instant};
use tracing::debug;

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Source of the current time, swappable so tests can step it.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A single pending deadline. Scheduling replaces any earlier one.
#[derive(Debug, Clone)]
pub struct IdleTimer {
    period: Duration,
    deadline: Option<Instant>,
}

impl IdleTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            deadline: None,
        }
    }

    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the deadline if it has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    LineScanned,
    Cycling,
}

#[derive(Debug, Clone)]
pub struct CorrectionSession {
    misspellings: Vec<MisspelledWord>,
    active_index: Option<usize>,
    last_scanned_line: Option<usize>,
    idle_timer: IdleTimer,
}

impl CorrectionSession {
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            misspellings: Vec::new(),
            active_index: None,
            last_scanned_line: None,
            idle_timer: IdleTimer::new(idle_timeout),
        }
    }

    pub fn state(&self) -> SessionState {
        match (self.last_scanned_line, self.active_index) {
            (None, _) => SessionState::Idle,
            (Some(_), None) => SessionState::LineScanned,
            (Some(_), Some(_)) => SessionState::Cycling,
        }
    }

    pub fn misspellings(&self) -> &[MisspelledWord] {
        &self.misspellings
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active_word(&self) -> Option<&MisspelledWord> {
        self.active_index.and_then(|i| self.misspellings.get(i))
    }

    pub fn last_scanned_line(&self) -> Option<usize> {
        self.last_scanned_line
    }

    pub fn idle_timer(&self) -> &IdleTimer {
        &self.idle_timer
    }

    pub fn reset(&mut self) {
        self.misspellings.clear();
        self.active_index = None;
        self.last_scanned_line = None;
        self.idle_timer.cancel();
    }

    /// Reset if the idle timer has run out. Returns whether it fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.idle_timer.fire_if_due(now) {
            debug!("Idle timeout, discarding spelling cycle");
            self.reset();
            true
        } else {
            false
        }
    }

    /// Select the word the next menu should show.
    ///
    /// The first call on a line scans it and picks the word closest to the
    /// cursor; later calls on the same line rotate forward through the list
    /// regardless of where the cursor is. `scan` runs only when the line
    /// has to be (re)scanned.
    pub fn advance<F>(&mut self, cursor: Position, now: Instant, scan: F) -> Option<&MisspelledWord>
    where
        F: FnOnce() -> Vec<MisspelledWord>,
    {
        self.tick(now);

        if self.last_scanned_line != Some(cursor.line) {
            self.reset();
            self.misspellings = scan();
            self.last_scanned_line = Some(cursor.line);
        }

        if self.misspellings.is_empty() {
            self.reset();
            return None;
        }

        let next = match self.active_index {
            None => {
                let closest = closest_word(&self.misspellings, cursor)?;
                self.misspellings.iter().position(|w| w.same_span(closest))?
            }
            Some(index) => (index + 1) % self.misspellings.len(),
        };

        self.active_index = Some(next);
        self.idle_timer.schedule(now);
        debug!(
            "Spelling cycle at {}/{} on line {}",
            next + 1,
            self.misspellings.len(),
            cursor.line
        );
        self.misspellings.get(next)
    }
}
