use std::thread;
use std::time::{Duration, Instant};

/// Fixed-rate tick pacer owned by the driver loop.
#[derive(Debug)]
pub struct FrameClock {
    interval: Duration,
    last_tick: Instant,
}

impl FrameClock {
    /// Starts a clock that yields `ticks_per_second` ticks per second.
    #[must_use]
    pub fn new(ticks_per_second: u32) -> Self {
        Self::with_interval(Duration::from_secs(1) / ticks_per_second.max(1))
    }

    #[must_use]
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: Instant::now(),
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time left until the next tick is due.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.interval.saturating_sub(self.last_tick.elapsed())
    }

    /// Sleeps until the next tick is due, then starts the next interval.
    ///
    /// A late frame does not accumulate debt; the next interval starts now.
    pub fn wait_for_next_tick(&mut self) {
        let remaining = self.remaining();
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
        self.last_tick = Instant::now();
    }
}
