use std::collections::HashSet;

use crate::core::math::{sign, Vec2};
use crate::domain::CollisionMask;
use crate::spatial::{ColliderId, CollisionWorld, RayHit, RayQuery};
use crate::systems::raycast_geometry::RaycastGeometry;

/// One passenger's move for the current platform tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassengerRecord {
    pub collider: ColliderId,
    pub amount: Vec2,
    pub standing_on_platform: bool,
    /// Moved before the platform translates (otherwise right after)
    pub move_before_platform: bool,
}

/// Whatever owns the passengers' controllers.
pub trait PassengerMover {
    fn move_passenger(&mut self, world: &mut CollisionWorld, passenger: &PassengerRecord);
}

/// Rays a platform casts to find passengers
pub(super) struct PassengerScan<'a> {
    pub world: &'a CollisionWorld,
    pub geometry: &'a RaycastGeometry,
    pub platform: ColliderId,
    pub mask: CollisionMask,
}

impl PassengerScan<'_> {
    fn cast_row(&self, origins: impl Iterator<Item = Vec2>, direction: Vec2, length: f32) -> Vec<Option<RayHit>> {
        let queries: Vec<RayQuery> = origins
            .map(|origin| RayQuery::new(origin, direction, length, self.mask).excluding(self.platform))
            .collect();
        self.world.raycast_all(&queries)
    }

    /// Every body the platform will push or carry when moving by `velocity`.
    /// A body is claimed by the first ray that reaches it.
    pub fn find(&self, velocity: Vec2) -> Vec<PassengerRecord> {
        let skin = self.geometry.skin_width;
        let spacing = self.geometry.spacing;
        let origins = self.geometry.origins;

        let mut claimed: HashSet<ColliderId> = HashSet::new();
        let mut records = Vec::new();
        let mut claim = |hit: &RayHit, amount: Vec2, standing: bool, before: bool| {
            if hit.distance != 0.0 && claimed.insert(hit.collider) {
                records.push(PassengerRecord {
                    collider: hit.collider,
                    amount,
                    standing_on_platform: standing,
                    move_before_platform: before,
                });
            }
        };

        let dir_x = sign(velocity.x);
        let dir_y = sign(velocity.y);

        // rising: lift whatever sits above
        if velocity.y > 0.0 {
            let length = velocity.y.abs() + skin;
            let row = (0..spacing.vertical_count)
                .map(|i| origins.top_left + Vec2::RIGHT * (spacing.vertical_spacing * i as f32));
            for hit in self.cast_row(row, Vec2::UP, length).iter().flatten() {
                let push = Vec2::new(velocity.x, velocity.y - (hit.distance - skin) * dir_y);
                claim(hit, push, true, true);
            }
        }

        // sideways: shove whatever is in the way
        if velocity.x != 0.0 {
            let length = velocity.x.abs() + skin;
            let base = if dir_x < 0.0 {
                origins.bottom_left
            } else {
                origins.bottom_right
            };
            let row = (0..spacing.horizontal_count)
                .map(|i| base + Vec2::UP * (spacing.horizontal_spacing * i as f32));
            for hit in self.cast_row(row, Vec2::RIGHT * dir_x, length).iter().flatten() {
                let push = Vec2::new(velocity.x - (hit.distance - skin) * dir_x, -skin);
                claim(hit, push, false, true);
            }
        }

        // sinking or sliding: riders on top follow once the platform has moved
        if velocity.y < 0.0 || (velocity.y == 0.0 && velocity.x != 0.0) {
            let length = 2.0 * skin;
            let row = (0..spacing.vertical_count)
                .map(|i| origins.top_left + Vec2::RIGHT * (spacing.vertical_spacing * i as f32));
            for hit in self.cast_row(row, Vec2::UP, length).iter().flatten() {
                claim(hit, velocity, true, false);
            }
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::BoundingBox;
    use crate::domain::EngineSettings;

    struct Rig {
        world: CollisionWorld,
        platform: ColliderId,
        geometry: RaycastGeometry,
    }

    /// 3x1 platform centered at the origin (top at y = 0.5)
    fn rig() -> Rig {
        let mut world = CollisionWorld::new(2.0);
        let bounds = BoundingBox::from_size(Vec2::ZERO, 3.0, 1.0);
        let platform = world.add_box(bounds, CollisionMask::PLATFORM).unwrap();
        let geometry = RaycastGeometry::new(&bounds, &EngineSettings::default()).unwrap();
        Rig {
            world,
            platform,
            geometry,
        }
    }

    impl Rig {
        fn body(&mut self, min: (f32, f32), max: (f32, f32)) -> ColliderId {
            self.world
                .add_box(
                    BoundingBox::from_min_max(Vec2::new(min.0, min.1), Vec2::new(max.0, max.1)),
                    CollisionMask::BODY,
                )
                .unwrap()
        }

        fn find(&self, velocity: Vec2) -> Vec<PassengerRecord> {
            PassengerScan {
                world: &self.world,
                geometry: &self.geometry,
                platform: self.platform,
                mask: CollisionMask::BODY,
            }
            .find(velocity)
        }
    }

    #[test]
    fn rising_platform_lifts_a_rider_once() {
        let mut r = rig();
        // wide rider: every upward ray reaches it
        let rider = r.body((-1.5, 0.5), (1.5, 1.5));
        let found = r.find(Vec2::new(0.0, 0.2));
        assert_eq!(found.len(), 1);
        let p = found[0];
        assert_eq!(p.collider, rider);
        assert!((p.amount.y - 0.2).abs() < 1e-5);
        assert!(p.standing_on_platform && p.move_before_platform);
    }

    #[test]
    fn rising_platform_closes_the_gap_first() {
        let mut r = rig();
        r.body((-0.5, 0.6), (0.5, 1.6));
        let found = r.find(Vec2::new(0.0, 0.3));
        // only the part of the rise that reaches the body pushes it
        assert!((found[0].amount.y - 0.2).abs() < 1e-5);
    }

    #[test]
    fn sideways_platform_shoves_ahead_of_itself() {
        let mut r = rig();
        let pushed = r.body((1.6, -0.5), (2.6, 0.5));
        let found = r.find(Vec2::new(0.3, 0.0));
        let p = found.iter().find(|p| p.collider == pushed).unwrap();
        assert!((p.amount.x - 0.2).abs() < 1e-5);
        assert!((p.amount.y + 0.015).abs() < 1e-6);
        assert!(!p.standing_on_platform);
        assert!(p.move_before_platform);
    }

    #[test]
    fn sinking_platform_carries_riders_after_moving() {
        let mut r = rig();
        let rider = r.body((-0.5, 0.5), (0.5, 1.5));
        // hovering just out of reach of the short rider rays
        r.body((1.0, 0.6), (1.4, 1.6));
        let v = Vec2::new(0.0, -0.25);
        let found = r.find(v);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].collider, rider);
        assert_eq!(found[0].amount, v);
        assert!(found[0].standing_on_platform);
        assert!(!found[0].move_before_platform);
    }

    #[test]
    fn still_platform_has_no_passengers() {
        let mut r = rig();
        r.body((-0.5, 0.5), (0.5, 1.5));
        assert!(r.find(Vec2::ZERO).is_empty());
    }
}
