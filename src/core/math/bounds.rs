use serde::{Deserialize, Serialize};

use super::Vec2;

/// Axis-aligned box stored as center + half extents.
///
/// Source of truth for a body's ray origins. Half extents are assumed to be
/// non-negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl BoundingBox {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self { center, half_extents }
    }

    /// Box from a center and a full width/height
    pub fn from_size(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center, Vec2::new(width * 0.5, height * 0.5))
    }

    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self::new((min + max) * 0.5, (max - min) * 0.5)
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    pub fn width(&self) -> f32 {
        self.half_extents.x * 2.0
    }

    pub fn height(&self) -> f32 {
        self.half_extents.y * 2.0
    }

    pub fn translate(mut self, by: Vec2) -> Self {
        self.center += by;
        self
    }

    /// Pull every side inward by `amount` (negative grows the box).
    pub fn shrink(mut self, amount: f32) -> Self {
        self.half_extents = self.half_extents - Vec2::new(amount, amount);
        self
    }

    pub fn union(&self, other: &BoundingBox) -> Self {
        let (a, b) = (self.min(), self.max());
        let (c, d) = (other.min(), other.max());
        Self::from_min_max(
            Vec2::new(a.x.min(c.x), a.y.min(c.y)),
            Vec2::new(b.x.max(d.x), b.y.max(d.y)),
        )
    }

    /// Strict containment (points on the boundary are outside).
    pub fn contains(&self, p: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        p.x > min.x && p.x < max.x && p.y > min.y && p.y < max.y
    }

    /// Entry/exit ray parameters through this box, if the ray crosses it.
    pub fn ray_span(&self, origin: Vec2, dir: Vec2) -> Option<(f32, f32)> {
        let (min, max) = (self.min(), self.max());
        let mut t0 = f32::NEG_INFINITY;
        let mut t1 = f32::INFINITY;
        for (o, d, lo, hi) in [(origin.x, dir.x, min.x, max.x), (origin.y, dir.y, min.y, max.y)] {
            if d == 0.0 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let a = (lo - o) / d;
            let b = (hi - o) / d;
            t0 = t0.max(a.min(b));
            t1 = t1.min(a.max(b));
        }
        if t1 < t0.max(0.0) {
            return None;
        }
        Some((t0.max(0.0), t1))
    }
}
