//! Spawn timing: a staggered startup burst plus a fixed-period spawner.

use driftnodes_core::{DEFAULT_BURST_COUNT, DEFAULT_BURST_STAGGER_MS, DEFAULT_SPAWN_INTERVAL_MS};

/// Produces the animation timestamps at which nodes are due to spawn.
///
/// The burst fires at `0, stagger, 2 * stagger, ...` and the periodic spawner
/// independently at `interval, 2 * interval, ...`. The two streams are merged
/// in time order.
#[derive(Debug, Clone)]
pub struct SpawnSchedule {
    burst_count: u32,
    burst_stagger_ms: u64,
    interval_ms: u64,
    /// Burst spawns already emitted.
    burst_emitted: u32,
    /// Index of the next periodic spawn, starting at 1.
    next_period: u64,
}

impl Default for SpawnSchedule {
    fn default() -> Self {
        Self::new(
            DEFAULT_BURST_COUNT,
            DEFAULT_BURST_STAGGER_MS,
            DEFAULT_SPAWN_INTERVAL_MS,
        )
    }
}

impl SpawnSchedule {
    /// A zero `interval_ms` is treated as 1 ms.
    pub fn new(burst_count: u32, burst_stagger_ms: u64, interval_ms: u64) -> Self {
        Self {
            burst_count,
            burst_stagger_ms,
            interval_ms: interval_ms.max(1),
            burst_emitted: 0,
            next_period: 1,
        }
    }

    fn next_burst_at(&self) -> Option<u64> {
        (self.burst_emitted < self.burst_count)
            .then(|| u64::from(self.burst_emitted) * self.burst_stagger_ms)
    }

    fn next_periodic_at(&self) -> u64 {
        self.next_period * self.interval_ms
    }

    /// Timestamp of the next spawn, due or not.
    #[cfg(test)]
    fn next_due(&self) -> u64 {
        match self.next_burst_at() {
            Some(burst) => burst.min(self.next_periodic_at()),
            None => self.next_periodic_at(),
        }
    }

    /// Remove and return every spawn due at or before `now_ms`, oldest first.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<u64> {
        let mut due = Vec::new();
        loop {
            let periodic = self.next_periodic_at();
            match self.next_burst_at() {
                Some(burst) if burst <= now_ms && burst <= periodic => {
                    due.push(burst);
                    self.burst_emitted += 1;
                }
                _ if periodic <= now_ms => {
                    due.push(periodic);
                    self.next_period += 1;
                }
                _ => break,
            }
        }
        due
    }
}
