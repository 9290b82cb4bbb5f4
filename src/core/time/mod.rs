//! Wall-clock time, independent of the simulation `dt`.

mod clock;
mod stopwatch;
mod timers;

pub use clock::{Clock, ManualClock, SystemClock};
pub use stopwatch::Stopwatch;
pub use timers::DelayedTasks;
