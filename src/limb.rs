//! Limb value types.
//!
//! A [`Limb`] names a body part by kind and identity. It is the payload handed
//! to spawned limbs and weapons, and the key used to match a detached limb
//! against the attached one it came from.
use bevy::prelude::*;

/// Closed set of body-part kinds.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LimbKind {
    /// An arm.
    Arm,
    /// A leg.
    Leg,
    /// A head. Has no default sprites.
    Head,
}

/// Identity of a limb within its owner's body.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LimbId(pub u32);

impl LimbId {
    /// Returns the raw identifier.
    #[must_use]
    pub const fn into_inner(self) -> u32 {
        self.0
    }
}

impl From<u32> for LimbId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A body part, compared by value.
///
/// # Examples
///
/// ```
/// use limbfall::{Limb, LimbKind};
///
/// let left_arm = Limb::arm(1);
/// assert_eq!(left_arm.kind, LimbKind::Arm);
/// assert_eq!(left_arm, Limb::new(LimbKind::Arm, 1));
/// assert_ne!(left_arm, Limb::leg(1));
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[reflect(Component)]
pub struct Limb {
    /// Which body part this is.
    pub kind: LimbKind,
    /// Which instance of that body part.
    pub id: LimbId,
}

impl Limb {
    /// Creates a limb of `kind` with the given identifier.
    #[must_use]
    pub const fn new(kind: LimbKind, id: u32) -> Self {
        Self {
            kind,
            id: LimbId(id),
        }
    }

    /// Shorthand for an arm.
    #[must_use]
    pub const fn arm(id: u32) -> Self {
        Self::new(LimbKind::Arm, id)
    }

    /// Shorthand for a leg.
    #[must_use]
    pub const fn leg(id: u32) -> Self {
        Self::new(LimbKind::Leg, id)
    }

    /// Shorthand for a head.
    #[must_use]
    pub const fn head(id: u32) -> Self {
        Self::new(LimbKind::Head, id)
    }
}
