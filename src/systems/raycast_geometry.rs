//! Ray origin geometry shared by body controllers and moving platforms.
//!
//! Every ray starts on the body's box pulled in by the skin width, so a body
//! resting exactly on a surface still sees it at distance `skin`.

use crate::core::math::{BoundingBox, Vec2};
use crate::core::{EngineError, EngineResult};
use crate::domain::EngineSettings;

/// Corners of the skin-inset box
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RayOrigins {
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
    pub top_left: Vec2,
    pub top_right: Vec2,
}

/// Ray counts and gaps. Horizontal rays are stacked along the height,
/// vertical rays along the width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaySpacing {
    pub horizontal_count: usize,
    pub vertical_count: usize,
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
}

fn check_extent(bounds: &BoundingBox, skin: f32) -> EngineResult<()> {
    let min = 4.0 * skin;
    let (w, h) = (bounds.width(), bounds.height());
    if !(w > min && h > min) {
        return Err(EngineError::BodyTooSmall {
            width: w,
            height: h,
            min,
        });
    }
    Ok(())
}

/// Four corner origins of `bounds` inset by `skin` on every side.
pub fn compute_origins(bounds: &BoundingBox, skin: f32) -> EngineResult<RayOrigins> {
    check_extent(bounds, skin)?;
    Ok(origins_unchecked(bounds, skin))
}

#[inline]
fn origins_unchecked(bounds: &BoundingBox, skin: f32) -> RayOrigins {
    let inner = bounds.shrink(skin);
    let (min, max) = (inner.min(), inner.max());
    RayOrigins {
        bottom_left: Vec2::new(min.x, min.y),
        bottom_right: Vec2::new(max.x, min.y),
        top_left: Vec2::new(min.x, max.y),
        top_right: Vec2::new(max.x, max.y),
    }
}

/// Upper bound on parallel rays along one side of a box
pub const MAX_RAYS_PER_AXIS: usize = 1024;

fn ray_count(axis: &'static str, dimension: f32, gap: f32) -> EngineResult<usize> {
    let count = (dimension / gap).round();
    if !(count >= 2.0) {
        return Err(EngineError::TooFewRays {
            axis,
            count: if count.is_finite() { count as i64 } else { 0 },
            dimension,
            spacing: gap,
        });
    }
    if count > MAX_RAYS_PER_AXIS as f32 {
        return Err(EngineError::TooManyRays {
            axis,
            count,
            max: MAX_RAYS_PER_AXIS,
            dimension,
            spacing: gap,
        });
    }
    Ok(count as usize)
}

/// `count = round(dimension / gap)`, `spacing = dimension / (count - 1)`,
/// measured on the skin-inset box.
pub fn compute_spacing(bounds: &BoundingBox, skin: f32, desired_gap: f32) -> EngineResult<RaySpacing> {
    check_extent(bounds, skin)?;
    if !(desired_gap.is_finite() && desired_gap > 0.0) {
        return Err(EngineError::InvalidSettings(format!(
            "ray spacing must be > 0, got {desired_gap}"
        )));
    }
    let inner = bounds.shrink(skin);
    let (w, h) = (inner.width(), inner.height());

    let vertical_count = ray_count("vertical", w, desired_gap)?;
    let horizontal_count = ray_count("horizontal", h, desired_gap)?;

    Ok(RaySpacing {
        horizontal_count,
        vertical_count,
        horizontal_spacing: h / (horizontal_count - 1) as f32,
        vertical_spacing: w / (vertical_count - 1) as f32,
    })
}

/// Per-body ray layout. Counts are fixed at creation; origins follow the box.
#[derive(Clone, Debug)]
pub struct RaycastGeometry {
    pub skin_width: f32,
    pub spacing: RaySpacing,
    pub origins: RayOrigins,
}

impl RaycastGeometry {
    pub fn new(bounds: &BoundingBox, settings: &EngineSettings) -> EngineResult<Self> {
        let spacing = compute_spacing(bounds, settings.skin_width, settings.ray_spacing)?;
        let origins = compute_origins(bounds, settings.skin_width)?;
        Ok(Self {
            skin_width: settings.skin_width,
            spacing,
            origins,
        })
    }

    /// Refresh origins from the current box. Size is validated in `new`.
    pub fn update_origins(&mut self, bounds: &BoundingBox) {
        self.origins = origins_unchecked(bounds, self.skin_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKIN: f32 = 0.015;

    #[test]
    fn origins_sit_strictly_inside_the_box() {
        let b = BoundingBox::from_size(Vec2::new(2.0, 3.0), 1.0, 2.0);
        let o = compute_origins(&b, SKIN).unwrap();
        for corner in [o.bottom_left, o.bottom_right, o.top_left, o.top_right] {
            assert!(b.contains(corner));
        }
        assert!((o.bottom_left.x - (1.5 + SKIN)).abs() < 1e-6);
        assert!((o.top_right.y - (4.0 - SKIN)).abs() < 1e-6);
    }

    #[test]
    fn tiny_box_is_a_configuration_error() {
        let b = BoundingBox::from_size(Vec2::ZERO, 4.0 * SKIN, 1.0);
        assert!(matches!(
            compute_origins(&b, SKIN),
            Err(EngineError::BodyTooSmall { .. })
        ));
    }

    #[test]
    fn unit_box_gets_four_rays_per_axis() {
        let b = BoundingBox::from_size(Vec2::ZERO, 1.0, 1.0);
        let s = compute_spacing(&b, SKIN, 0.25).unwrap();
        assert_eq!(s.vertical_count, 4);
        assert_eq!(s.horizontal_count, 4);
        assert!((s.vertical_spacing - 0.97 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn thin_box_yields_too_few_rays() {
        // wide enough for the skin but rounds to a single ray
        let b = BoundingBox::from_size(Vec2::ZERO, 2.0, 0.2);
        assert!(matches!(
            compute_spacing(&b, SKIN, 0.25),
            Err(EngineError::TooFewRays { axis: "horizontal", .. })
        ));
    }

    #[test]
    fn vanishing_ray_spacing_is_rejected() {
        let b = BoundingBox::from_size(Vec2::ZERO, 1.0, 1.0);
        assert!(matches!(
            compute_spacing(&b, SKIN, 1e-30),
            Err(EngineError::TooManyRays { axis: "vertical", max: MAX_RAYS_PER_AXIS, .. })
        ));
        // 1024 rays across a 256.03 box is still accepted
        let wide = BoundingBox::from_size(Vec2::ZERO, 256.0 + 2.0 * SKIN, 1.0);
        assert_eq!(compute_spacing(&wide, SKIN, 0.25).unwrap().vertical_count, 1024);
    }

    #[test]
    fn update_origins_tracks_the_box() {
        let b = BoundingBox::from_size(Vec2::ZERO, 1.0, 1.0);
        let mut g = RaycastGeometry::new(&b, &EngineSettings::default()).unwrap();
        g.update_origins(&b.translate(Vec2::new(5.0, 0.0)));
        assert!((g.origins.bottom_left.x - (4.5 + SKIN)).abs() < 1e-5);
    }
}
