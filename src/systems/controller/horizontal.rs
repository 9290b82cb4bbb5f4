use crate::core::math::{same_angle, Vec2};
use crate::spatial::CollisionWorld;

use super::Controller2D;

impl Controller2D {
    /// Rays along the leading vertical edge. The lowest ray may start a climb.
    pub(super) fn horizontal_collisions(&mut self, world: &CollisionWorld, amount: &mut Vec2) {
        let skin = self.geometry.skin_width;
        let spacing = self.geometry.spacing;
        let origins = self.geometry.origins;

        let dir = self.state.face_direction as f32;
        // flush-adjacent walls still register when barely moving
        let mut length = if amount.x.abs() < skin {
            2.0 * skin
        } else {
            amount.x.abs() + skin
        };

        for i in 0..spacing.horizontal_count {
            let base = if dir < 0.0 {
                origins.bottom_left
            } else {
                origins.bottom_right
            };
            let origin = base + Vec2::UP * (spacing.horizontal_spacing * i as f32);

            let Some(hit) = self.cast(world, origin, Vec2::RIGHT * dir, length) else {
                continue;
            };
            // overlapping already; let the other axis sort it out
            if hit.distance == 0.0 {
                continue;
            }

            let slope_angle = hit.normal.angle_from_up();
            if i == 0 && slope_angle <= self.max_slope_angle {
                if self.state.descending_slope {
                    self.state.descending_slope = false;
                    *amount = self.state.move_amount_old;
                }

                // climb only the part of the step past the slope foot
                let mut distance_to_slope_start = 0.0;
                if !same_angle(slope_angle, self.state.slope_angle_old) {
                    distance_to_slope_start = hit.distance - skin;
                    amount.x -= distance_to_slope_start * dir;
                }
                self.climb_slope(amount, slope_angle, hit.normal);
                amount.x += distance_to_slope_start * dir;
            }

            if !self.state.climbing_slope || slope_angle > self.max_slope_angle {
                amount.x = (hit.distance - skin) * dir;
                length = hit.distance;

                if self.state.climbing_slope {
                    amount.y = self.state.slope_angle.to_radians().tan() * amount.x.abs();
                }

                self.state.left = dir < 0.0;
                self.state.right = dir > 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::core::math::{BoundingBox, Vec2};
    use crate::domain::{CollisionMask, DirectionalInput};
    use crate::spatial::{CollisionWorld, Shape};

    #[test]
    fn wall_clamps_motion_and_sets_side_flag() {
        let mut world = CollisionWorld::new(2.0);
        floor(&mut world, 0.0);
        world
            .add_box(
                BoundingBox::from_min_max(Vec2::new(3.0, 0.0), Vec2::new(4.0, 5.0)),
                CollisionMask::GROUND,
            )
            .unwrap();
        // right edge at x = 1, wall face at x = 3
        let (mut c, _) = spawn(&mut world, Vec2::new(0.5, 0.5), 1.0, 1.0);

        c.move_by(&mut world, Vec2::new(5.0, 0.0), DirectionalInput::NONE, false);

        let b = world.bounds_of(c.collider()).unwrap();
        assert!((b.max().x - 3.0).abs() < 1e-4);
        assert!(c.collisions().right);
        assert!(!c.collisions().left);
    }

    #[test]
    fn nearest_obstacle_wins_across_rays() {
        let mut world = CollisionWorld::new(2.0);
        // far block in front of the low rays, near block in front of the top ray
        world
            .add_box(
                BoundingBox::from_min_max(Vec2::new(-6.0, 0.0), Vec2::new(-5.0, 0.5)),
                CollisionMask::GROUND,
            )
            .unwrap();
        world
            .add_box(
                BoundingBox::from_min_max(Vec2::new(-3.0, 0.8), Vec2::new(-2.0, 2.0)),
                CollisionMask::GROUND,
            )
            .unwrap();
        let (mut c, _) = spawn(&mut world, Vec2::new(0.0, 0.5), 1.0, 1.0);

        c.move_by(&mut world, Vec2::new(-10.0, 0.0), DirectionalInput::NONE, false);

        let b = world.bounds_of(c.collider()).unwrap();
        assert!((b.min().x - (-2.0)).abs() < 1e-4);
        assert!(c.collisions().left);
        assert_eq!(c.collisions().face_direction, -1);
    }

    #[test]
    fn ignored_layers_do_not_block() {
        let mut world = CollisionWorld::new(2.0);
        world
            .add(
                Shape::rect(Vec2::new(0.5, 2.0)).unwrap(),
                Vec2::new(2.5, 0.5),
                CollisionMask::BODY,
            )
            .unwrap();
        let (mut c, _) = spawn(&mut world, Vec2::new(0.0, 0.5), 1.0, 1.0);
        c.move_by(&mut world, Vec2::new(4.0, 0.0), DirectionalInput::NONE, false);
        let b = world.bounds_of(c.collider()).unwrap();
        assert!((b.center.x - 4.0).abs() < 1e-5);
        assert!(!c.collisions().right);
    }
}
