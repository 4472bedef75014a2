//! Fixed-timestep tick driver.
//!
//! Hosts that own their main loop pace sessions with this: accumulate
//! elapsed time, run a tick whenever a full period has built up, sleep
//! the remainder. Timing statistics are recorded per tick so a slow
//! session shows up in the numbers rather than as silent drift.

use std::time::{Duration, Instant};

/// Timing statistics across completed ticks.
#[derive(Clone, Copy, Debug)]
pub struct TickTimings {
    /// Ticks completed.
    pub ticks: u64,
    /// Shortest tick observed, in microseconds.
    pub min_us: u64,
    /// Longest tick observed, in microseconds.
    pub max_us: u64,
    /// Rolling average tick duration, in microseconds.
    pub avg_us: u64,
    /// Ticks that overran the period.
    pub over_budget: u64,
}

impl Default for TickTimings {
    fn default() -> Self {
        Self {
            ticks: 0,
            min_us: u64::MAX,
            max_us: 0,
            avg_us: 0,
            over_budget: 0,
        }
    }
}

/// Accumulator-based fixed-timestep driver.
pub struct TickDriver {
    period: Duration,
    last_poll: Instant,
    accumulator: Duration,
    timings: TickTimings,
}

impl TickDriver {
    /// Creates a driver for the given tick rate in Hz.
    #[must_use]
    pub fn new(tick_rate: u32) -> Self {
        Self {
            period: Duration::from_micros(1_000_000 / u64::from(tick_rate.max(1))),
            last_poll: Instant::now(),
            accumulator: Duration::ZERO,
            timings: TickTimings::default(),
        }
    }

    /// Accumulates elapsed time and reports whether a tick is due.
    ///
    /// Call in a loop; each `true` must be paired with [`Self::begin`]
    /// and [`Self::complete`].
    pub fn tick_due(&mut self) -> bool {
        let now = Instant::now();
        self.accumulator += now.duration_since(self.last_poll);
        self.last_poll = now;
        self.accumulator >= self.period
    }

    /// Starts a due tick; returns its start instant.
    pub fn begin(&mut self) -> Instant {
        self.accumulator = self.accumulator.saturating_sub(self.period);
        Instant::now()
    }

    /// Finishes a tick started at `started` and records its duration.
    pub fn complete(&mut self, started: Instant) {
        let elapsed = started.elapsed();
        let elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);

        self.timings.ticks += 1;
        self.timings.min_us = self.timings.min_us.min(elapsed_us);
        self.timings.max_us = self.timings.max_us.max(elapsed_us);
        self.timings.avg_us = if self.timings.ticks == 1 {
            elapsed_us
        } else {
            (self.timings.avg_us * 7 + elapsed_us) / 8
        };
        if elapsed > self.period {
            self.timings.over_budget += 1;
        }
    }

    /// Sleeps until the next tick is roughly due.
    ///
    /// Plain sleep; sub-millisecond jitter is acceptable for this
    /// workload.
    pub fn wait(&self) {
        let elapsed = Instant::now().duration_since(self.last_poll);
        let pending = self.accumulator + elapsed;
        if pending < self.period {
            std::thread::sleep(self.period - pending);
        }
    }

    /// Target tick period.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Timing statistics so far.
    #[must_use]
    pub fn timings(&self) -> TickTimings {
        self.timings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_from_rate() {
        let driver = TickDriver::new(60);
        assert_eq!(driver.period(), Duration::from_micros(16_666));
    }

    #[test]
    fn test_tick_becomes_due() {
        let mut driver = TickDriver::new(1000);
        std::thread::sleep(Duration::from_millis(5));
        assert!(driver.tick_due());

        let started = driver.begin();
        driver.complete(started);
        assert_eq!(driver.timings().ticks, 1);
    }

    #[test]
    fn test_timings_are_consistent() {
        let mut driver = TickDriver::new(1000);
        for _ in 0..5 {
            std::thread::sleep(Duration::from_millis(2));
            while driver.tick_due() {
                let started = driver.begin();
                std::thread::sleep(Duration::from_micros(100));
                driver.complete(started);
            }
        }

        let timings = driver.timings();
        assert!(timings.ticks > 0);
        assert!(timings.min_us <= timings.max_us);
    }
}
