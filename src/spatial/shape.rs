use crate::core::math::{BoundingBox, Vec2};
use crate::core::{EngineError, EngineResult};

/// Parallel-edge guard for ray/segment tests
const PARALLEL_EPSILON: f32 = 1e-9;
/// Lets rays hitting a shared polygon vertex land on either edge
const EDGE_SLACK: f32 = 1e-6;

/// Collider geometry in local space (relative to the collider position).
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle centered on the position
    Rect { half_extents: Vec2 },
    /// Simple polygon, either winding
    Polygon { points: Vec<Vec2> },
}

impl Shape {
    pub fn rect(half_extents: Vec2) -> EngineResult<Self> {
        if !half_extents.is_finite() || half_extents.x <= 0.0 || half_extents.y <= 0.0 {
            return Err(EngineError::InvalidShape(format!(
                "rect half extents must be positive, got ({}, {})",
                half_extents.x, half_extents.y
            )));
        }
        Ok(Shape::Rect { half_extents })
    }

    pub fn polygon(points: Vec<Vec2>) -> EngineResult<Self> {
        if points.len() < 3 {
            return Err(EngineError::InvalidShape(format!(
                "polygon needs at least 3 points, got {}",
                points.len()
            )));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(EngineError::InvalidShape("polygon has non-finite points".to_string()));
        }
        if signed_area(&points).abs() < 1e-6 {
            return Err(EngineError::InvalidShape("polygon has zero area".to_string()));
        }
        Ok(Shape::Polygon { points })
    }

    pub fn local_bounds(&self) -> BoundingBox {
        match self {
            Shape::Rect { half_extents } => BoundingBox::new(Vec2::ZERO, *half_extents),
            Shape::Polygon { points } => {
                let mut min = points[0];
                let mut max = points[0];
                for p in points.iter().skip(1) {
                    min = Vec2::new(min.x.min(p.x), min.y.min(p.y));
                    max = Vec2::new(max.x.max(p.x), max.y.max(p.y));
                }
                BoundingBox::from_min_max(min, max)
            }
        }
    }

    /// Is `p` (world space) strictly inside the shape placed at `position`?
    pub fn contains(&self, position: Vec2, p: Vec2) -> bool {
        let local = p - position;
        match self {
            Shape::Rect { half_extents } => BoundingBox::new(Vec2::ZERO, *half_extents).contains(local),
            Shape::Polygon { points } => point_in_polygon(points, local),
        }
    }

    /// Nearest hit of a ray against the shape boundary, as (distance, normal).
    ///
    /// A ray starting inside the shape hits it at distance 0, with the normal
    /// pointing back along the ray.
    pub fn intersect_ray(&self, position: Vec2, origin: Vec2, dir: Vec2, max_t: f32) -> Option<(f32, Vec2)> {
        if self.contains(position, origin) {
            return Some((0.0, -dir));
        }
        let local = origin - position;
        match self {
            Shape::Rect { half_extents } => {
                let h = *half_extents;
                let corners = [
                    Vec2::new(-h.x, -h.y),
                    Vec2::new(h.x, -h.y),
                    Vec2::new(h.x, h.y),
                    Vec2::new(-h.x, h.y),
                ];
                ray_vs_edges(&corners, local, dir, max_t)
            }
            Shape::Polygon { points } => ray_vs_edges(points, local, dir, max_t),
        }
    }
}

fn ray_vs_edges(points: &[Vec2], origin: Vec2, dir: Vec2, max_t: f32) -> Option<(f32, Vec2)> {
    let mut best: Option<(f32, Vec2)> = None;
    for i in 0..points.len() {
        let a = points[i];
        let b = points[(i + 1) % points.len()];
        let edge = b - a;
        let denom = dir.cross(edge);
        if denom.abs() < PARALLEL_EPSILON {
            continue;
        }
        let w = a - origin;
        let t = w.cross(edge) / denom;
        let s = w.cross(dir) / denom;
        if t < 0.0 || t > max_t || s < -EDGE_SLACK || s > 1.0 + EDGE_SLACK {
            continue;
        }
        if best.map_or(true, |(bt, _)| t < bt) {
            let mut normal = Vec2::new(edge.y, -edge.x).normalize();
            if normal.dot(dir) > 0.0 {
                normal = -normal;
            }
            best = Some((t, normal));
        }
    }
    best
}

fn point_in_polygon(points: &[Vec2], p: Vec2) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn signed_area(points: &[Vec2]) -> f32 {
    let mut area = 0.0;
    for i in 0..points.len() {
        area += points[i].cross(points[(i + 1) % points.len()]);
    }
    area * 0.5
}
