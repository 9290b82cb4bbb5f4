use crate::core::math::Vec2;
use crate::domain::CollisionMask;

use super::{ColliderId, CollisionWorld};

/// Extra reach past the world extent so hits on its boundary still register
const LIMIT_SLACK: f32 = 1e-4;

/// A single ray query against the collision world
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayQuery {
    pub origin: Vec2,
    /// Need not be normalized
    pub direction: Vec2,
    /// `f32::INFINITY` for an unbounded ray
    pub max_distance: f32,
    pub mask: CollisionMask,
    /// Collider the ray can never hit (usually the caster's own)
    pub exclude: Option<ColliderId>,
}

impl RayQuery {
    pub fn new(origin: Vec2, direction: Vec2, max_distance: f32, mask: CollisionMask) -> Self {
        Self {
            origin,
            direction,
            max_distance,
            mask,
            exclude: None,
        }
    }

    pub fn excluding(mut self, id: ColliderId) -> Self {
        self.exclude = Some(id);
        self
    }
}

/// Nearest surface a ray reached
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub collider: ColliderId,
    pub distance: f32,
    pub point: Vec2,
    /// Unit normal of the surface, facing the ray
    pub normal: Vec2,
    /// Layers of the collider that was hit (check `is_through()` here)
    pub layers: CollisionMask,
}

/// Cast one ray. `None` is the normal "nothing there" outcome.
pub(super) fn cast(world: &CollisionWorld, query: &RayQuery) -> Option<RayHit> {
    if !query.origin.is_finite() || !query.direction.is_finite() || query.max_distance.is_nan() {
        return None;
    }
    if query.max_distance < 0.0 {
        return None;
    }
    let dir = query.direction.normalize();
    if dir == Vec2::ZERO {
        return None;
    }

    let extent = world.extent()?;
    let (_, t_leave) = extent.ray_span(query.origin, dir)?;
    let limit = query.max_distance.min(t_leave) + LIMIT_SLACK;

    let mut best: Option<RayHit> = None;
    world.index.traverse(query.origin, dir, limit, |ids, t_exit| {
        for id in ids {
            if query.exclude == Some(*id) {
                continue;
            }
            let Some(collider) = world.get(*id) else {
                continue;
            };
            if !collider.layers.intersects(query.mask) {
                continue;
            }
            let Some((t, normal)) =
                collider
                    .shape
                    .intersect_ray(collider.position, query.origin, dir, query.max_distance)
            else {
                continue;
            };
            let closer = match best {
                None => true,
                Some(b) => t < b.distance || (t == b.distance && id.0 < b.collider.0),
            };
            if closer {
                best = Some(RayHit {
                    collider: *id,
                    distance: t,
                    point: query.origin + dir * t,
                    normal,
                    layers: collider.layers,
                });
            }
        }
        // anything closer than the cell exit has been seen by now
        best.map_or(false, |b| b.distance <= t_exit)
    });
    best
}
