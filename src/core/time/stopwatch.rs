#[cfg(target_arch = "wasm32")]
use js_sys;

/// Millisecond time since a start point.
///
/// Origin of [`SystemClock`](super::SystemClock) and of the per-section perf
/// timings in `step`. Readings never go below zero, even when the browser's
/// `Date.now()` steps backwards.
#[derive(Clone, Copy, Debug)]
pub struct Stopwatch {
    #[cfg(target_arch = "wasm32")]
    start_ms: f64,
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Stopwatch { start_ms: js_sys::Date::now() }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Stopwatch { start: std::time::Instant::now() }
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            (js_sys::Date::now() - self.start_ms).max(0.0)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.start.elapsed().as_secs_f64() * 1000.0
        }
    }

    /// Elapsed time, then restart from now. Times consecutive sections with
    /// one stopwatch.
    pub fn lap_ms(&mut self) -> f64 {
        let elapsed = self.elapsed_ms();
        *self = Stopwatch::start();
        elapsed
    }
}
