//! CollisionWorld - the shared ray-cast service every body and platform queries
//!
//! Colliders are rects or polygons tagged with layer masks. A uniform-cell
//! broadphase keeps ray casts local: a ray only tests colliders listed in the
//! cells it walks through, and stops as soon as the nearest hit is known.
//!
//! Queries are read-only; positions change only through `translate` /
//! `set_position`, which callers do after a scan phase completes.

mod index;
pub mod perf;
pub mod raycast;
mod shape;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::math::{BoundingBox, Vec2};
use crate::core::{EngineError, EngineResult};
use crate::domain::CollisionMask;

use index::{CellIndex, MAX_CELLS_PER_COLLIDER};
pub use raycast::{RayHit, RayQuery};
pub use shape::Shape;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColliderId(pub u32);

/// A placed shape
#[derive(Clone, Debug)]
pub struct Collider {
    pub id: ColliderId,
    pub shape: Shape,
    pub position: Vec2,
    pub layers: CollisionMask,
    bounds: BoundingBox,
    moving: bool,
}

impl Collider {
    /// World-space bounds
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }
}

/// Current bounds of every live collider. Colliders that have never moved
/// and those that have are kept apart so per-move upkeep only walks the
/// movers.
pub struct CollisionWorld {
    colliders: Vec<Option<Collider>>,
    index: CellIndex,
    live: usize,
    static_extent: Option<BoundingBox>,
    moving: Vec<ColliderId>,
    moving_extent: Option<BoundingBox>,
}

fn union_all(bounds: impl Iterator<Item = BoundingBox>) -> Option<BoundingBox> {
    bounds.reduce(|a, b| a.union(&b))
}

impl CollisionWorld {
    pub fn new(cell_size: f32) -> Self {
        Self {
            colliders: Vec::new(),
            index: CellIndex::new(cell_size),
            live: 0,
            static_extent: None,
            moving: Vec::new(),
            moving_extent: None,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.index.cell_size()
    }

    /// Fails with `InvalidShape` when the shape would span more broadphase
    /// cells than one collider may.
    pub fn add(&mut self, shape: Shape, position: Vec2, layers: CollisionMask) -> EngineResult<ColliderId> {
        let bounds = shape.local_bounds().translate(position);
        let cells = self.index.cell_count(&bounds);
        if cells > MAX_CELLS_PER_COLLIDER {
            return Err(EngineError::InvalidShape(format!(
                "collider {}x{} covers {} cells of size {}, limit {}",
                bounds.width(),
                bounds.height(),
                cells,
                self.index.cell_size(),
                MAX_CELLS_PER_COLLIDER
            )));
        }

        let id = ColliderId(self.colliders.len() as u32);
        self.index.insert(id, &bounds);
        self.colliders.push(Some(Collider {
            id,
            shape,
            position,
            layers,
            bounds,
            moving: false,
        }));
        self.live += 1;
        self.static_extent = Some(match self.static_extent {
            Some(e) => e.union(&bounds),
            None => bounds,
        });
        Ok(id)
    }

    /// Axis-aligned box collider positioned at the box center
    pub fn add_box(&mut self, bounds: BoundingBox, layers: CollisionMask) -> EngineResult<ColliderId> {
        let shape = Shape::rect(bounds.half_extents)?;
        self.add(shape, bounds.center, layers)
    }

    /// Union of every live collider's current bounds. Bounds how far an
    /// unbounded ray has to walk.
    pub fn extent(&self) -> Option<BoundingBox> {
        match (self.static_extent, self.moving_extent) {
            (Some(a), Some(b)) => Some(a.union(&b)),
            (a, b) => a.or(b),
        }
    }

    fn refresh_static_extent(&mut self) {
        self.static_extent = union_all(self.iter().filter(|c| !c.moving).map(|c| c.bounds));
    }

    fn refresh_moving_extent(&mut self) {
        let colliders = &self.colliders;
        self.moving_extent = union_all(
            self.moving
                .iter()
                .filter_map(|id| colliders.get(id.0 as usize)?.as_ref())
                .map(|c| c.bounds),
        );
    }

    pub fn remove(&mut self, id: ColliderId) -> bool {
        let Some(slot) = self.colliders.get_mut(id.0 as usize) else {
            return false;
        };
        let Some(collider) = slot.take() else {
            return false;
        };
        self.index.remove(id, &collider.bounds);
        self.live -= 1;
        if collider.moving {
            self.moving.retain(|m| *m != id);
            self.refresh_moving_extent();
        } else {
            self.refresh_static_extent();
        }
        true
    }

    pub fn clear(&mut self) {
        self.colliders.clear();
        self.index.clear();
        self.live = 0;
        self.static_extent = None;
        self.moving.clear();
        self.moving_extent = None;
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn get(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.get(id.0 as usize)?.as_ref()
    }

    pub fn bounds_of(&self, id: ColliderId) -> Option<BoundingBox> {
        self.get(id).map(|c| c.bounds)
    }

    pub fn position_of(&self, id: ColliderId) -> Option<Vec2> {
        self.get(id).map(|c| c.position)
    }

    pub fn set_position(&mut self, id: ColliderId, position: Vec2) -> bool {
        let Some(Some(collider)) = self.colliders.get_mut(id.0 as usize) else {
            return false;
        };
        let old = collider.bounds;
        collider.position = position;
        collider.bounds = collider.shape.local_bounds().translate(position);
        let new = collider.bounds;
        let first_move = !collider.moving;
        collider.moving = true;

        self.index.remove(id, &old);
        self.index.insert(id, &new);
        if first_move {
            self.moving.push(id);
            self.refresh_static_extent();
        }
        self.refresh_moving_extent();
        true
    }

    pub fn translate(&mut self, id: ColliderId, by: Vec2) -> bool {
        match self.position_of(id) {
            Some(p) => self.set_position(id, p + by),
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Collider> {
        self.colliders.iter().flatten()
    }

    /// Nearest hit along one ray
    pub fn raycast(&self, query: &RayQuery) -> Option<RayHit> {
        let hit = raycast::cast(self, query);
        perf::record_casts(1, hit.is_some() as u64);
        hit
    }

    /// Independent rays, answered in query order. Spread over the rayon
    /// pool with the `parallel` feature.
    pub fn raycast_all(&self, queries: &[RayQuery]) -> Vec<Option<RayHit>> {
        #[cfg(feature = "parallel")]
        let hits: Vec<Option<RayHit>> = queries.par_iter().map(|q| raycast::cast(self, q)).collect();

        #[cfg(not(feature = "parallel"))]
        let hits: Vec<Option<RayHit>> = queries.iter().map(|q| raycast::cast(self, q)).collect();

        let hit_count = hits.iter().filter(|h| h.is_some()).count();
        perf::record_casts(queries.len() as u64, hit_count as u64);
        hits
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new(crate::domain::settings::DEFAULT_CELL_SIZE)
    }
}
