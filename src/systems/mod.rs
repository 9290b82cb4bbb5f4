//! Movement systems: ray layout, the body controller, moving platforms and
//! the body registry that ties them together.

pub mod body_system;
pub mod controller;
pub mod platform;
pub mod raycast_geometry;

pub use body_system::{BodySpec, BodySystem, KinematicBody};
pub use controller::{CollisionState, Controller2D};
pub use platform::{MovingPlatform, PassengerMover, PassengerRecord, PathPhase, PlatformConfig, WaypointPath};
pub use raycast_geometry::{RayOrigins, RaySpacing, RaycastGeometry};
