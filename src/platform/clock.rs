//! Millisecond clocks
//!
//! All cooldowns and timers in the simulation are deadlines against a clock
//! reading, so tests can drive time by hand.

/// Source of the current time in milliseconds
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Clock that only moves when told to
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now_ms: f64,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self { now_ms: start_ms }
    }

    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }

    pub fn set(&mut self, ms: f64) {
        self.now_ms = ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}
