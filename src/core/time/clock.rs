use std::sync::atomic::{AtomicU64, Ordering};

use super::Stopwatch;

/// Real-time source for delayed tasks.
pub trait Clock: Send + Sync {
    /// Milliseconds since an arbitrary, fixed origin.
    fn now_ms(&self) -> f64;
}

/// Wall clock measured from the moment it was created
pub struct SystemClock {
    origin: Stopwatch,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Stopwatch::start() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed_ms()
    }
}

/// Clock that only moves when told to (tests, replays, lock-step hosts).
#[derive(Default)]
pub struct ManualClock {
    bits: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ms(&self, ms: f64) {
        self.bits.store(ms.to_bits(), Ordering::Relaxed);
    }

    pub fn advance_ms(&self, ms: f64) {
        self.set_ms(self.now_ms() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}
