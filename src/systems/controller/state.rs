use serde::Serialize;

use crate::core::math::Vec2;

/// Collision report of the last resolution step.
///
/// Owned and mutated by exactly one [`Controller2D`](super::Controller2D);
/// hosts read it for jump logic, facing visuals and so on.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CollisionState {
    pub above: bool,
    pub below: bool,
    pub left: bool,
    pub right: bool,

    pub climbing_slope: bool,
    pub descending_slope: bool,
    pub sliding_down_max_slope: bool,

    /// Degrees from up
    pub slope_angle: f32,
    /// `slope_angle` of the previous step
    pub slope_angle_old: f32,
    pub slope_normal: Vec2,
    /// Displacement requested in the current step, before resolution
    pub move_amount_old: Vec2,

    /// +1 or -1, survives every reset
    pub face_direction: i8,
    /// Cleared only by the delayed reset task, never by `reset`
    pub falling_through_platform: bool,
}

impl CollisionState {
    pub fn new() -> Self {
        Self {
            above: false,
            below: false,
            left: false,
            right: false,
            climbing_slope: false,
            descending_slope: false,
            sliding_down_max_slope: false,
            slope_angle: 0.0,
            slope_angle_old: 0.0,
            slope_normal: Vec2::ZERO,
            move_amount_old: Vec2::ZERO,
            face_direction: 1,
            falling_through_platform: false,
        }
    }

    /// Start of a step: contacts and slope flags go neutral, the current
    /// slope angle becomes the old one.
    pub fn reset(&mut self) {
        self.above = false;
        self.below = false;
        self.left = false;
        self.right = false;

        self.climbing_slope = false;
        self.descending_slope = false;
        self.sliding_down_max_slope = false;

        self.slope_normal = Vec2::ZERO;
        self.move_amount_old = Vec2::ZERO;

        self.slope_angle_old = self.slope_angle;
        self.slope_angle = 0.0;
    }
}

impl Default for CollisionState {
    fn default() -> Self {
        Self::new()
    }
}
