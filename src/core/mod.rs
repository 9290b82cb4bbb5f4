//! Core building blocks shared by every system: math, time, errors, logging.

#[macro_use]
#[path = "utils/log.rs"]
mod log;

pub mod error;
pub mod math;
pub mod time;

pub use error::{EngineError, EngineResult};
