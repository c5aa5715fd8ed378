//! Fixed-cadence tick scheduling
//!
//! Turns frame deltas into a whole number of simulation ticks. The simulation
//! result never depends on this, only how quickly it is produced.

use crate::Settings;

/// Accumulator for a fixed tick period
#[derive(Debug, Clone)]
pub struct TickClock {
    interval: f32,
    max_catch_up: u32,
    accumulator: f32,
}

impl TickClock {
    pub fn new(interval_secs: f32, max_catch_up: u32) -> Self {
        Self {
            interval: interval_secs.max(f32::EPSILON),
            max_catch_up: max_catch_up.max(1),
            accumulator: 0.0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.tick_interval_secs(), settings.max_catch_up)
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Add elapsed time, returning how many ticks are due
    ///
    /// At most `max_catch_up` ticks are returned; surplus time is dropped to
    /// prevent a spiral of death after a long stall.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.max(0.0);

        let mut due = 0;
        while self.accumulator >= self.interval && due < self.max_catch_up {
            self.accumulator -= self.interval;
            due += 1;
        }
        if due == self.max_catch_up && self.accumulator >= self.interval {
            log::debug!("Tick clock fell behind, dropping {:.3}s", self.accumulator);
            self.accumulator %= self.interval;
        }
        due
    }
}
