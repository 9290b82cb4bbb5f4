//! BodySystem - the kinematic bodies a world moves around
//!
//! Each body is a box collider plus the [`Controller2D`] that resolves its
//! moves. The system also answers platforms asking to move a passenger.
//!
//! [`Controller2D`]: crate::systems::controller::Controller2D

mod system;

pub use system::{BodySpec, BodySystem, KinematicBody};
