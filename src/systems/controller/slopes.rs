use crate::core::math::{same_angle, sign, Vec2};
use crate::spatial::{CollisionWorld, RayHit};

use super::Controller2D;

impl Controller2D {
    /// Turn horizontal run into motion along a walkable slope, unless the body
    /// is already rising faster than the slope would lift it.
    pub(super) fn climb_slope(&mut self, amount: &mut Vec2, slope_angle: f32, slope_normal: Vec2) {
        let move_distance = amount.x.abs();
        let rad = slope_angle.to_radians();
        let climb_y = rad.sin() * move_distance;

        if amount.y <= climb_y {
            amount.y = climb_y;
            amount.x = rad.cos() * move_distance * sign(amount.x);

            self.state.below = true;
            self.state.climbing_slope = true;
            self.state.slope_angle = slope_angle;
            self.state.slope_normal = slope_normal;
        }
    }

    /// Downward step: slide off too-steep ledges, or hug a walkable slope the
    /// body is walking down.
    pub(super) fn descend_slope(&mut self, world: &CollisionWorld, amount: &mut Vec2) {
        let skin = self.geometry.skin_width;
        let origins = self.geometry.origins;

        let reach = amount.y.abs() + skin;
        let hit_left = self.cast(world, origins.bottom_left, Vec2::DOWN, reach);
        let hit_right = self.cast(world, origins.bottom_right, Vec2::DOWN, reach);

        // only one corner supported: straddling a steep edge
        if hit_left.is_some() != hit_right.is_some() {
            self.slide_down_max_slope(hit_left, amount);
            self.slide_down_max_slope(hit_right, amount);
        }

        if self.state.sliding_down_max_slope {
            return;
        }

        let dir = sign(amount.x);
        let origin = if dir < 0.0 {
            origins.bottom_right
        } else {
            origins.bottom_left
        };
        let Some(hit) = self.cast(world, origin, Vec2::DOWN, f32::INFINITY) else {
            return;
        };

        let slope_angle = hit.normal.angle_from_up();
        if same_angle(slope_angle, 0.0) || slope_angle > self.max_slope_angle {
            return;
        }
        // slope must fall away in the direction of travel
        if sign(hit.normal.x) != dir {
            return;
        }
        let rad = slope_angle.to_radians();
        if hit.distance - skin <= rad.tan() * amount.x.abs() {
            let move_distance = amount.x.abs();
            amount.x = rad.cos() * move_distance * sign(amount.x);
            amount.y -= rad.sin() * move_distance;

            self.state.slope_angle = slope_angle;
            self.state.descending_slope = true;
            self.state.below = true;
            self.state.slope_normal = hit.normal;
        }
    }

    fn slide_down_max_slope(&mut self, hit: Option<RayHit>, amount: &mut Vec2) {
        let Some(hit) = hit else {
            return;
        };
        let slope_angle = hit.normal.angle_from_up();
        if slope_angle > self.max_slope_angle {
            amount.x = sign(hit.normal.x) * (amount.y.abs() - hit.distance) / slope_angle.to_radians().tan();

            self.state.slope_angle = slope_angle;
            self.state.sliding_down_max_slope = true;
            self.state.slope_normal = hit.normal;
        }
    }
}
