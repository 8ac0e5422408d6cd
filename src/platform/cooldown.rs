//! Spawn cooldown
//!
//! The gate is a single "expires at" timestamp. Callers pass the current
//! time in milliseconds (`Date.now()` in the browser), so there is no
//! timer to schedule and tests can step time by hand.

/// Rate limiter for the spawn key
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cooldown {
    expires_at: Option<f64>,
}

impl Cooldown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the gated action may fire at `now`
    pub fn is_ready(&self, now: f64) -> bool {
        self.expires_at.is_none_or(|t| now >= t)
    }

    /// Start a cooldown of `duration_ms` beginning at `now`
    pub fn trigger(&mut self, now: f64, duration_ms: f64) {
        self.expires_at = (duration_ms > 0.0).then_some(now + duration_ms);
    }

    /// Milliseconds left before the gate reopens
    pub fn remaining(&self, now: f64) -> f64 {
        self.expires_at.map_or(0.0, |t| (t - now).max(0.0))
    }
}
