use serde::Serialize;

use crate::core::math::Vec2;
use crate::core::{EngineError, EngineResult};

/// Legs shorter than this count as already arrived
const MIN_LEG_LENGTH: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PathPhase {
    /// Waiting out the pause after an arrival (or nothing to travel)
    Idle,
    Traveling,
}

/// Waypoint traversal with easing and pauses.
///
/// Time is the sum of the `dt`s handed to [`advance`](Self::advance), so a
/// paused host pauses the platform too.
#[derive(Clone, Debug)]
pub struct WaypointPath {
    waypoints: Vec<Vec2>,
    speed: f32,
    ease_amount: f32,
    cyclic: bool,
    wait_time: f32,

    from_index: usize,
    percent: f32,
    // seconds of accumulated dt; f32 stops advancing by 1/60 after ~6 days
    time: f64,
    next_move_time: f64,
}

impl WaypointPath {
    /// `waypoints` are world positions. `ease_amount` in [0, 2], 0 is linear.
    pub fn new(
        waypoints: Vec<Vec2>,
        speed: f32,
        ease_amount: f32,
        cyclic: bool,
        wait_time: f32,
    ) -> EngineResult<Self> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(EngineError::InvalidPlatform(format!("speed must be > 0, got {speed}")));
        }
        if !(0.0..=2.0).contains(&ease_amount) {
            return Err(EngineError::InvalidPlatform(format!(
                "ease_amount must be in [0, 2], got {ease_amount}"
            )));
        }
        if !(wait_time.is_finite() && wait_time >= 0.0) {
            return Err(EngineError::InvalidPlatform(format!(
                "wait_time must be >= 0, got {wait_time}"
            )));
        }
        if waypoints.iter().any(|p| !p.is_finite()) {
            return Err(EngineError::InvalidPlatform("non-finite waypoint".to_string()));
        }
        Ok(Self {
            waypoints,
            speed,
            ease_amount,
            cyclic,
            wait_time,
            from_index: 0,
            percent: 0.0,
            time: 0.0,
            next_move_time: 0.0,
        })
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn from_index(&self) -> usize {
        if self.waypoints.is_empty() {
            0
        } else {
            self.from_index % self.waypoints.len()
        }
    }

    /// Fraction of the current leg already covered
    pub fn percent(&self) -> f32 {
        self.percent
    }

    pub fn phase(&self) -> PathPhase {
        if self.waypoints.len() < 2 || self.time < self.next_move_time {
            PathPhase::Idle
        } else {
            PathPhase::Traveling
        }
    }

    /// `x^a / (x^a + (1-x)^a)` with `a = ease_amount + 1`
    pub fn ease(&self, x: f32) -> f32 {
        let a = self.ease_amount + 1.0;
        let xa = x.powf(a);
        xa / (xa + (1.0 - x).powf(a))
    }

    /// Advance by `dt` and return the displacement that takes a platform at
    /// `current` to its new spot on the path.
    pub fn advance(&mut self, dt: f32, current: Vec2) -> Vec2 {
        self.time += dt as f64;

        // a single point (or nothing) is not a path
        if self.waypoints.len() < 2 || self.time < self.next_move_time {
            return Vec2::ZERO;
        }

        let len = self.waypoints.len();
        self.from_index %= len;
        let to_index = (self.from_index + 1) % len;
        let from = self.waypoints[self.from_index];
        let to = self.waypoints[to_index];

        let distance = from.distance(to);
        if distance > MIN_LEG_LENGTH {
            self.percent = (self.percent + dt * self.speed / distance).clamp(0.0, 1.0);
        } else {
            self.percent = 1.0;
        }

        let eased = self.ease(self.percent);
        let new_position = from.lerp(to, eased);

        if self.percent >= 1.0 {
            self.percent = 0.0;
            self.from_index += 1;

            if !self.cyclic && self.from_index >= len - 1 {
                self.from_index = 0;
                self.waypoints.reverse();
                engine_log!("waypoint path reversed ({} waypoints)", len);
            }

            self.next_move_time = self.time + self.wait_time as f64;
        }

        new_position - current
    }
}
