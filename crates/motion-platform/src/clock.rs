use std::time::{Duration, Instant};

use crossbeam_channel::{select, tick, Receiver};
use tracing::debug;

/// Seconds since an arbitrary fixed origin. Never goes backwards.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Fixed-rate tick source feeding a `(now)` callback.
#[derive(Debug, Clone)]
pub struct Scheduler {
    period: Duration,
    clock: MonotonicClock,
}

impl Scheduler {
    /// Rates that do not give a finite, non-zero period fall back to one tick per second.
    pub fn new(rate_hz: f64) -> Self {
        let period = Duration::try_from_secs_f64(1.0 / rate_hz)
            .ok()
            .filter(|period| rate_hz > 0.0 && !period.is_zero())
            .unwrap_or(Duration::from_secs(1));
        Self {
            period,
            clock: MonotonicClock::new(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn clock(&self) -> MonotonicClock {
        self.clock
    }

    /// Calls `on_tick` with the clock time once per period until `stop`
    /// receives a message or is disconnected.
    pub fn run(&self, stop: &Receiver<()>, mut on_tick: impl FnMut(f64)) {
        let ticker = tick(self.period);
        let mut ticks: u64 = 0;
        loop {
            select! {
                recv(ticker) -> _ => {
                    ticks += 1;
                    on_tick(self.clock.now());
                }
                recv(stop) -> _ => break,
            }
        }
        debug!(ticks, period = ?self.period, "scheduler stopped");
    }
}
