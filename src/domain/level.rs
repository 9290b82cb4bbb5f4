//! Level bundle: the JSON a host loads to populate a world in one call.
//!
//! ```json
//! {
//!   "settings": { "max_slope_angle": 60 },
//!   "colliders": [
//!     { "shape": { "rect": { "x": 0, "y": -0.5, "width": 40, "height": 1 } } },
//!     { "shape": { "polygon": { "points": [[2,0],[6,0],[6,2]] } } },
//!     { "shape": { "rect": { "x": 8, "y": 3, "width": 3, "height": 0.5 } },
//!       "layers": ["ground", "through"] }
//!   ],
//!   "bodies": [ { "x": 0, "y": 0.5, "width": 1, "height": 1 } ],
//!   "platforms": [
//!     { "x": 12, "y": 1, "width": 3, "height": 0.5, "speed": 2,
//!       "waypoints": [[0,0],[0,4]], "wait_time": 0.5 }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::core::math::{BoundingBox, Vec2};
use crate::core::EngineResult;
use crate::domain::mask::CollisionMask;
use crate::domain::settings::EngineSettings;
use crate::spatial::Shape;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LevelBundle {
    #[serde(default)]
    pub settings: EngineSettings,
    #[serde(default)]
    pub colliders: Vec<ColliderDef>,
    #[serde(default)]
    pub bodies: Vec<BodyDef>,
    #[serde(default)]
    pub platforms: Vec<PlatformDef>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColliderDef {
    pub shape: ShapeDef,
    #[serde(default = "default_ground_layers")]
    pub layers: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeDef {
    Rect { x: f32, y: f32, width: f32, height: f32 },
    Polygon { points: Vec<[f32; 2]> },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BodyDef {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default = "default_body_layers")]
    pub layers: Vec<String>,
    #[serde(default = "default_body_mask")]
    pub mask: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlatformDef {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default = "default_platform_layers")]
    pub layers: Vec<String>,
    #[serde(default = "default_passenger_mask")]
    pub passenger_mask: Vec<String>,
    pub speed: f32,
    #[serde(default)]
    pub ease_amount: f32,
    #[serde(default)]
    pub cyclic: bool,
    #[serde(default)]
    pub wait_time: f32,
    /// Offsets from the platform's starting position
    #[serde(default)]
    pub waypoints: Vec<[f32; 2]>,
}

fn default_ground_layers() -> Vec<String> {
    vec!["ground".to_string()]
}

fn default_body_layers() -> Vec<String> {
    vec!["body".to_string()]
}

fn default_body_mask() -> Vec<String> {
    vec!["ground".to_string(), "platform".to_string()]
}

fn default_platform_layers() -> Vec<String> {
    vec!["platform".to_string()]
}

fn default_passenger_mask() -> Vec<String> {
    vec!["body".to_string()]
}

impl LevelBundle {
    pub fn from_bundle_json(json: &str) -> EngineResult<Self> {
        let bundle: LevelBundle = serde_json::from_str(json)?;
        bundle.settings.validate()?;
        Ok(bundle)
    }
}

impl ColliderDef {
    pub fn layers(&self) -> EngineResult<CollisionMask> {
        CollisionMask::from_names(&self.layers)
    }

    /// Shape plus the world position it is anchored at
    pub fn to_shape(&self) -> EngineResult<(Shape, Vec2)> {
        match &self.shape {
            ShapeDef::Rect { x, y, width, height } => {
                let bounds = BoundingBox::from_size(Vec2::new(*x, *y), *width, *height);
                Ok((Shape::rect(bounds.half_extents)?, bounds.center))
            }
            ShapeDef::Polygon { points } => {
                let points: Vec<Vec2> = points.iter().map(|p| Vec2::new(p[0], p[1])).collect();
                Ok((Shape::polygon(points)?, Vec2::ZERO))
            }
        }
    }
}

impl BodyDef {
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_size(Vec2::new(self.x, self.y), self.width, self.height)
    }
}

impl PlatformDef {
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_size(Vec2::new(self.x, self.y), self.width, self.height)
    }

    pub fn local_waypoints(&self) -> Vec<Vec2> {
        self.waypoints.iter().map(|p| Vec2::new(p[0], p[1])).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_defaults_layers_and_masks() {
        let json = r#"{
            "colliders": [ { "shape": { "rect": { "x": 0, "y": 0, "width": 4, "height": 1 } } } ],
            "bodies": [ { "x": 0, "y": 2, "width": 1, "height": 1 } ],
            "platforms": [ { "x": 5, "y": 0, "width": 2, "height": 0.5, "speed": 1,
                             "waypoints": [[0,0],[0,3]] } ]
        }"#;
        let bundle = LevelBundle::from_bundle_json(json).unwrap();
        assert_eq!(bundle.colliders[0].layers().unwrap(), CollisionMask::GROUND);
        assert_eq!(
            CollisionMask::from_names(&bundle.bodies[0].mask).unwrap(),
            CollisionMask::GROUND | CollisionMask::PLATFORM
        );
        assert_eq!(bundle.platforms[0].local_waypoints()[1], Vec2::new(0.0, 3.0));
        assert_eq!(bundle.platforms[0].ease_amount, 0.0);
    }

    #[test]
    fn bad_settings_reject_the_bundle() {
        let json = r#"{ "settings": { "skin_width": -1 } }"#;
        assert!(LevelBundle::from_bundle_json(json).is_err());
    }

    #[test]
    fn malformed_json_is_an_error_not_a_panic() {
        assert!(LevelBundle::from_bundle_json("{ nope").is_err());
    }
}
