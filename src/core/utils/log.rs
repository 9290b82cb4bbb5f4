//! Engine logging
//!
//! In the browser: straight to `console.log` / `console.warn`.
//! Everywhere else: `tracing` events, so native hosts and tests pick them up
//! with whatever subscriber they install (or drop them when none is set).
//!
//! Usage:
//! ```ignore
//! engine_log!("platform {} reversed ({} waypoints)", id, len);
//! engine_warn!("collider {:?} vanished mid-move", collider);
//! ```

/// Informational engine event
macro_rules! engine_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::log_1(&format!($($arg)*).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::debug!($($arg)*);
        }
    }};
}

/// Something the host probably got wrong, but the tick keeps going
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::warn_1(&format!($($arg)*).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::warn!($($arg)*);
        }
    }};
}
