//! Simulation clock and state hashing.
//!
//! The engine does not own a timer. Hosts either call
//! `Engine::apply_tick(seconds)` on their own schedule, or feed wall time to
//! `Engine::advance`, which accumulates it and runs as many fixed steps as
//! fit, carrying the remainder forward.

use crate::fixed::Amount;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Tick counter and fixed-step accumulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimClock {
    /// Number of ticks applied so far.
    pub tick: u64,

    /// Seconds handed to `advance` that have not yet filled a whole step.
    pub accumulator: Amount,

    /// Total simulated seconds.
    pub elapsed: Amount,
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            tick: 0,
            accumulator: Amount::ZERO,
            elapsed: Amount::ZERO,
        }
    }

    pub(crate) fn record_tick(&mut self, seconds: Amount) {
        self.tick += 1;
        self.elapsed = self.elapsed.saturating_add(seconds);
    }

    /// Add wall time and return how many whole steps of `step` are now due.
    /// The due time is removed from the accumulator.
    pub(crate) fn accumulate(&mut self, seconds: Amount, step: Amount) -> u64 {
        if step <= Amount::ZERO {
            return 0;
        }
        self.accumulator = self.accumulator.saturating_add(seconds);
        let due = self.accumulator.saturating_div(step).floor();
        self.accumulator = self.accumulator.saturating_sub(due.saturating_mul(step));
        due.saturating_to_num::<u64>()
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// State hash
// ---------------------------------------------------------------------------

/// FNV-1a hash over engine state, for determinism checks between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateHash(pub u64);

impl StateHash {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    pub fn new() -> Self {
        Self(Self::FNV_OFFSET)
    }

    pub fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(Self::FNV_PRIME);
        }
    }

    pub fn write_u64(&mut self, v: u64) {
        self.write(&v.to_le_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.write(&v.to_le_bytes());
    }

    pub fn write_amount(&mut self, v: Amount) {
        self.write(&v.to_bits().to_le_bytes());
    }

    pub fn finish(&self) -> u64 {
        self.0
    }
}

impl Default for StateHash {
    fn default() -> Self {
        Self::new()
    }
}
