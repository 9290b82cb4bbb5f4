use serde::{Deserialize, Serialize};

/// Raw directional input, each axis in {-1, 0, 1}.
///
/// `y == -1` while standing on a through platform requests falling through it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionalInput {
    pub x: i8,
    pub y: i8,
}

impl DirectionalInput {
    pub const NONE: DirectionalInput = DirectionalInput { x: 0, y: 0 };

    pub fn new(x: i8, y: i8) -> Self {
        Self {
            x: x.signum(),
            y: y.signum(),
        }
    }

    /// From analog axes (dead zone 0.5), the way JS hosts hand them over.
    pub fn from_axes(x: f32, y: f32) -> Self {
        Self {
            x: quantize(x),
            y: quantize(y),
        }
    }

    pub fn wants_fall_through(&self) -> bool {
        self.y == -1
    }
}

fn quantize(v: f32) -> i8 {
    if v >= 0.5 {
        1
    } else if v <= -0.5 {
        -1
    } else {
        0
    }
}
