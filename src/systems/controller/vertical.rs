use crate::core::math::{same_angle, sign, Vec2};
use crate::spatial::CollisionWorld;

use super::Controller2D;

impl Controller2D {
    /// Rays along the leading horizontal edge, shifted by the resolved `dx`.
    pub(super) fn vertical_collisions(&mut self, world: &CollisionWorld, amount: &mut Vec2) {
        let skin = self.geometry.skin_width;
        let spacing = self.geometry.spacing;
        let origins = self.geometry.origins;

        let dir = sign(amount.y);
        let mut length = amount.y.abs() + skin;

        for i in 0..spacing.vertical_count {
            let base = if dir < 0.0 {
                origins.bottom_left
            } else {
                origins.top_left
            };
            let origin = base + Vec2::RIGHT * (spacing.vertical_spacing * i as f32 + amount.x);

            let Some(hit) = self.cast(world, origin, Vec2::UP * dir, length) else {
                continue;
            };

            if hit.layers.is_through() {
                if dir > 0.0 || hit.distance == 0.0 {
                    continue;
                }
                if self.state.falling_through_platform {
                    continue;
                }
                if self.input.wants_fall_through() {
                    self.begin_fall_through();
                    continue;
                }
            }

            amount.y = (hit.distance - skin) * dir;
            length = hit.distance;

            if self.state.climbing_slope {
                amount.x = amount.y / self.state.slope_angle.to_radians().tan() * sign(amount.x);
            }

            self.state.below = dir < 0.0;
            self.state.above = dir > 0.0;
        }

        if self.state.climbing_slope {
            self.check_slope_transition(world, amount);
        }
    }

    /// A climb can run into a different slope within the same step; stop at it.
    fn check_slope_transition(&mut self, world: &CollisionWorld, amount: &mut Vec2) {
        let skin = self.geometry.skin_width;
        let origins = self.geometry.origins;

        let dir = sign(amount.x);
        let length = amount.x.abs() + skin;
        let base = if dir < 0.0 {
            origins.bottom_left
        } else {
            origins.bottom_right
        };
        let origin = base + Vec2::UP * amount.y;

        let Some(hit) = self.cast(world, origin, Vec2::RIGHT * dir, length) else {
            return;
        };
        let slope_angle = hit.normal.angle_from_up();
        if !same_angle(slope_angle, self.state.slope_angle) {
            amount.x = (hit.distance - skin) * dir;
            self.state.slope_angle = slope_angle;
            self.state.slope_normal = hit.normal;
        }
    }
}
