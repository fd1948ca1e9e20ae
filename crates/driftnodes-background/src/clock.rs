//! Pausable animation clock.

use std::time::Instant;

/// Monotonic source of milliseconds.
pub trait TimeSource {
    fn now_ms(&self) -> u64;
}

/// Wall-clock source backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicSource {
    origin: Instant,
}

impl Default for MonotonicSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl TimeSource for MonotonicSource {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Animation time that stands still while paused.
#[derive(Debug)]
pub struct AnimationClock<S: TimeSource> {
    source: S,
    /// Source time spent paused, excluded from animation time.
    paused_total_ms: u64,
    /// Source time at which the current pause began.
    paused_at: Option<u64>,
}

impl AnimationClock<MonotonicSource> {
    /// Clock starting at zero now.
    pub fn start() -> Self {
        Self::new(MonotonicSource::new())
    }
}

impl<S: TimeSource> AnimationClock<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            paused_total_ms: 0,
            paused_at: None,
        }
    }

    /// Current animation time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        let raw = self.paused_at.unwrap_or_else(|| self.source.now_ms());
        raw.saturating_sub(self.paused_total_ms)
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(self.source.now_ms());
        }
    }

    pub fn resume(&mut self) {
        if let Some(at) = self.paused_at.take() {
            self.paused_total_ms += self.source.now_ms().saturating_sub(at);
        }
    }

    pub fn toggle(&mut self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
