//! Input debouncing
//!
//! Collapses a burst of calls into one, keeping only the last value. The
//! event loop polls the debouncer every tick; a value is released once the
//! quiet window has passed with no newer call.

use std::time::{Duration, Instant};

/// Default quiet period before a search fires
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a call, replacing any pending value and restarting the window
    pub fn call(&mut self, value: T) {
        self.call_at(value, Instant::now());
    }

    pub fn call_at(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Take the pending value if the window has elapsed
    pub fn poll(&mut self) -> Option<T> {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, at)) if now.saturating_duration_since(*at) >= self.window => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// When the pending value will be released
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.window)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without releasing it
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}
