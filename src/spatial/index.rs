use std::collections::HashMap;

use crate::core::math::{BoundingBox, Vec2};

use super::ColliderId;

/// Safety cap on cells walked by one ray
const MAX_TRAVERSAL_STEPS: u32 = 1 << 16;

/// Most cells one collider may cover
pub(crate) const MAX_CELLS_PER_COLLIDER: u64 = 1 << 16;

/// Uniform-cell broadphase.
///
/// A collider is listed in every cell its bounds overlap. How far an
/// unbounded ray walks is up to the caller (see `CollisionWorld::extent`).
pub(crate) struct CellIndex {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<ColliderId>>,
}

impl CellIndex {
    pub(crate) fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    pub(crate) fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cells `bounds` would be listed in
    pub(crate) fn cell_count(&self, bounds: &BoundingBox) -> u64 {
        let ((x0, y0), (x1, y1)) = self.cell_range(bounds);
        let w = (x1 as i64 - x0 as i64 + 1).max(0) as u64;
        let h = (y1 as i64 - y0 as i64 + 1).max(0) as u64;
        w.saturating_mul(h)
    }

    #[inline]
    fn cell_of(&self, p: Vec2) -> (i32, i32) {
        (
            (p.x / self.cell_size).floor() as i32,
            (p.y / self.cell_size).floor() as i32,
        )
    }

    fn cell_range(&self, bounds: &BoundingBox) -> ((i32, i32), (i32, i32)) {
        (self.cell_of(bounds.min()), self.cell_of(bounds.max()))
    }

    pub(crate) fn insert(&mut self, id: ColliderId, bounds: &BoundingBox) {
        let ((x0, y0), (x1, y1)) = self.cell_range(bounds);
        for cy in y0..=y1 {
            for cx in x0..=x1 {
                self.cells.entry((cx, cy)).or_default().push(id);
            }
        }
    }

    pub(crate) fn remove(&mut self, id: ColliderId, bounds: &BoundingBox) {
        let ((x0, y0), (x1, y1)) = self.cell_range(bounds);
        for cy in y0..=y1 {
            for cx in x0..=x1 {
                if let Some(ids) = self.cells.get_mut(&(cx, cy)) {
                    ids.retain(|c| *c != id);
                    if ids.is_empty() {
                        self.cells.remove(&(cx, cy));
                    }
                }
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.cells.clear();
    }

    /// Walk the cells a ray passes through, in order, up to distance `limit`.
    ///
    /// Grid DDA: step to whichever cell boundary (x or y) the ray reaches
    /// first. `visit` gets each non-empty cell with the ray parameter at which
    /// the ray leaves it, and returns true to stop the walk.
    pub(crate) fn traverse<F>(&self, origin: Vec2, dir: Vec2, limit: f32, mut visit: F)
    where
        F: FnMut(&[ColliderId], f32) -> bool,
    {
        let cs = self.cell_size;
        let (mut cx, mut cy) = self.cell_of(origin);

        let step_x = if dir.x > 0.0 { 1 } else if dir.x < 0.0 { -1 } else { 0 };
        let step_y = if dir.y > 0.0 { 1 } else if dir.y < 0.0 { -1 } else { 0 };

        let next_boundary_x = if step_x > 0 { (cx + 1) as f32 * cs } else { cx as f32 * cs };
        let next_boundary_y = if step_y > 0 { (cy + 1) as f32 * cs } else { cy as f32 * cs };

        let mut t_max_x = if step_x != 0 { (next_boundary_x - origin.x) / dir.x } else { f32::INFINITY };
        let mut t_max_y = if step_y != 0 { (next_boundary_y - origin.y) / dir.y } else { f32::INFINITY };
        let t_delta_x = if step_x != 0 { cs / dir.x.abs() } else { f32::INFINITY };
        let t_delta_y = if step_y != 0 { cs / dir.y.abs() } else { f32::INFINITY };

        let max_steps = (((limit / cs) * 2.0).ceil() as u32)
            .saturating_add(4)
            .min(MAX_TRAVERSAL_STEPS);

        for _ in 0..max_steps {
            let t_exit = t_max_x.min(t_max_y);
            if let Some(ids) = self.cells.get(&(cx, cy)) {
                if visit(ids, t_exit) {
                    return;
                }
            }
            if t_exit > limit {
                return;
            }
            if t_max_x < t_max_y {
                cx += step_x;
                t_max_x += t_delta_x;
            } else {
                cy += step_y;
                t_max_y += t_delta_y;
            }
        }
    }
}
