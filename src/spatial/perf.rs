use std::cell::RefCell;

thread_local! {
    pub static PERF_RAY_CASTS: RefCell<u64> = RefCell::new(0);
    pub static PERF_RAY_HITS: RefCell<u64> = RefCell::new(0);
}

#[inline]
pub(crate) fn record_casts(casts: u64, hits: u64) {
    PERF_RAY_CASTS.with(|c| {
        let mut v = c.borrow_mut();
        *v = v.saturating_add(casts);
    });
    PERF_RAY_HITS.with(|c| {
        let mut v = c.borrow_mut();
        *v = v.saturating_add(hits);
    });
}

pub fn reset_ray_perf_counters() {
    PERF_RAY_CASTS.with(|c| *c.borrow_mut() = 0);
    PERF_RAY_HITS.with(|c| *c.borrow_mut() = 0);
}

/// (casts, hits) since the last take/reset
pub fn take_ray_perf_counters() -> (u64, u64) {
    let casts = PERF_RAY_CASTS.with(|c| c.replace(0));
    let hits = PERF_RAY_HITS.with(|c| c.replace(0));
    (casts, hits)
}
