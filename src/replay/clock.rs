use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source driving the replay scheduler.
///
/// The engine only compares instants it obtained from the same clock, so
/// any monotonically non-decreasing source works.
pub trait ReplayClock {
    fn now(&self) -> Duration;
}

/// Wall-clock source backed by [`Instant`].
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl ReplayClock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually advanced clock for deterministic hosts and tests.
///
/// Cloning yields a handle onto the same underlying time, so a test can
/// advance the clock while the engine owns another handle. Single-threaded
/// by design, like the engine itself.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, by_ms: u64) {
        self.advance(Duration::from_millis(by_ms));
    }
}

impl ReplayClock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
