use serde::{Deserialize, Serialize};

use crate::core::{EngineError, EngineResult};

/// Collision layers a collider lives on, or that a ray is allowed to hit.
///
/// `THROUGH` is not a layer of its own: it is a capability tag marking a
/// one-way surface, combined with whatever layer the surface sits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollisionMask(pub u32);

impl CollisionMask {
    pub const NONE: CollisionMask = CollisionMask(0);
    pub const GROUND: CollisionMask = CollisionMask(1 << 0);
    pub const BODY: CollisionMask = CollisionMask(1 << 1);
    pub const PLATFORM: CollisionMask = CollisionMask(1 << 2);
    pub const THROUGH: CollisionMask = CollisionMask(1 << 31);
    pub const ALL: CollisionMask = CollisionMask(!0);

    /// Any bit in common
    #[inline]
    pub fn intersects(self, other: CollisionMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Every bit of `other` present
    #[inline]
    pub fn contains(self, other: CollisionMask) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn is_through(self) -> bool {
        self.contains(Self::THROUGH)
    }

    pub fn with(self, other: CollisionMask) -> Self {
        CollisionMask(self.0 | other.0)
    }

    /// Build a mask from layer names as they appear in level bundles.
    ///
    /// Accepts `ground`, `body`, `platform`, `through`, `all` and `layerN`
    /// (N in 0..31) for user layers.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> EngineResult<Self> {
        let mut mask = Self::NONE;
        for name in names {
            mask = mask.with(layer_from_str(name.as_ref())?);
        }
        Ok(mask)
    }
}

fn layer_from_str(s: &str) -> EngineResult<CollisionMask> {
    match s {
        "ground" => Ok(CollisionMask::GROUND),
        "body" => Ok(CollisionMask::BODY),
        "platform" => Ok(CollisionMask::PLATFORM),
        "through" => Ok(CollisionMask::THROUGH),
        "all" => Ok(CollisionMask::ALL),
        other => {
            let bit = other
                .strip_prefix("layer")
                .and_then(|n| n.parse::<u32>().ok())
                .filter(|n| *n < 31)
                .ok_or_else(|| EngineError::UnknownLayer(other.to_string()))?;
            Ok(CollisionMask(1 << bit))
        }
    }
}

impl std::ops::BitOr for CollisionMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.with(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn through_is_a_tag_on_top_of_a_layer() {
        let one_way = CollisionMask::GROUND | CollisionMask::THROUGH;
        assert!(one_way.is_through());
        assert!(one_way.intersects(CollisionMask::GROUND));
        assert!(!CollisionMask::GROUND.is_through());
    }

    #[test]
    fn names_parse_and_unknown_names_fail() {
        let mask = CollisionMask::from_names(&["ground", "layer4"]).unwrap();
        assert_eq!(mask, CollisionMask(1 | (1 << 4)));
        assert!(matches!(
            CollisionMask::from_names(&["lava"]),
            Err(EngineError::UnknownLayer(_))
        ));
        assert!(CollisionMask::from_names(&["layer31"]).is_err());
    }
}
