use std::thread;
use std::time::{Duration, Instant};

/// Blocks the loop until the next tick boundary.
pub trait TickPacer {
    fn wait_for_next_tick(&mut self);
}

/// Fixed-rate pacer backed by `thread::sleep`.
#[derive(Debug)]
pub struct FrameClock {
    interval: Duration,
    next_deadline: Option<Instant>,
}

impl FrameClock {
    /// Creates a clock ticking `ticks_per_second` times per second.
    #[must_use]
    pub fn new(ticks_per_second: u32) -> Self {
        Self {
            interval: tick_interval(ticks_per_second),
            next_deadline: None,
        }
    }

    /// Returns the time between two ticks.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl TickPacer for FrameClock {
    fn wait_for_next_tick(&mut self) {
        let now = Instant::now();
        let Some(deadline) = self.next_deadline else {
            self.next_deadline = Some(now + self.interval);
            return;
        };

        if deadline > now {
            thread::sleep(deadline - now);
            self.next_deadline = Some(deadline + self.interval);
        } else {
            // Overran; start over from now instead of bursting to catch up.
            self.next_deadline = Some(now + self.interval);
        }
    }
}

/// Converts a tick rate to a per-tick duration.
#[must_use]
pub fn tick_interval(ticks_per_second: u32) -> Duration {
    Duration::from_secs(1) / ticks_per_second.max(1)
}
