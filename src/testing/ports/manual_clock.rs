use std::cell::Cell;
use std::time::{Duration, Instant};

use crate::ports::Clock;

/// Clock that only moves when told to.
#[allow(dead_code)]
pub struct ManualClock {
    origin: Instant,
    offset: Cell<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self { origin: Instant::now(), offset: Cell::new(Duration::ZERO) }
    }
}

#[allow(dead_code)]
impl ManualClock {
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}
