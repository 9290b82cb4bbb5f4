//! 2D math used by the ray casts and the resolvers.

mod bounds;
mod vec2;

pub use bounds::BoundingBox;
pub use vec2::{sign, Vec2};

/// Two slope angles (degrees) closer than this are the same surface.
pub const ANGLE_EPSILON: f32 = 1e-3;

#[inline]
pub fn same_angle(a: f32, b: f32) -> bool {
    (a - b).abs() <= ANGLE_EPSILON
}
