//! ECS component types used by the limb factory.
//! Covers source-limb markers, visuals, rigid bodies, trigger volumes and the
//! behaviour components attached to spawned limbs and weapons.
use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;

use crate::limb::Limb;

/// Asset path of a sprite image, relative to the asset root.
#[derive(Reflect, Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct SpriteId(String);

impl SpriteId {
    /// Creates a sprite reference from an asset path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Borrows the underlying asset path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SpriteId {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Marks a live, still-attached limb that detached limbs can be matched
/// against.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct SourceLimb;

/// Sprite state of a limb or weapon.
#[derive(Component, Reflect, Default, Debug, Clone, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct LimbVisual {
    /// Sprite drawn for the entity, if any.
    pub sprite: Option<SpriteId>,
    /// Mirror horizontally.
    pub flip_x: bool,
    /// Mirror vertically.
    pub flip_y: bool,
}

impl LimbVisual {
    /// Visual showing `sprite` without mirroring.
    #[must_use]
    pub const fn with_sprite(sprite: SpriteId) -> Self {
        Self {
            sprite: Some(sprite),
            flip_x: false,
            flip_y: false,
        }
    }
}

/// 2D rigid body receiving one-off impulses.
///
/// Impulses accumulate until the physics backend consumes them; this crate
/// never integrates them itself.
#[derive(Component, Reflect, Debug, Clone, PartialEq)]
#[reflect(Component)]
pub struct RigidBody2d {
    /// Body mass in kilograms.
    pub mass: f32,
    /// Accumulated linear impulse.
    pub force: Vec3,
    /// Accumulated angular impulse around the z axis.
    pub torque: f32,
}

impl RigidBody2d {
    /// Creates a body at rest with the given mass.
    #[must_use]
    pub const fn new(mass: f32) -> Self {
        Self {
            mass,
            force: Vec3::ZERO,
            torque: 0.0,
        }
    }

    /// Adds a linear impulse.
    pub fn apply_force(&mut self, force: Vec3) {
        self.force += force;
    }

    /// Adds an angular impulse.
    pub const fn apply_torque(&mut self, torque: f32) {
        self.torque += torque;
    }

    /// Whether any impulse has been applied since creation.
    #[must_use]
    pub fn has_impulse(&self) -> bool {
        self.force.length_squared() > 0.0 || self.torque.abs() > 0.0
    }
}

/// Axis-aligned collision box.
///
/// Trigger volumes report overlaps but take no part in collision resolution.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct TriggerVolume {
    /// Full width and height of the box in world units.
    pub size: Vec2,
    /// Overlap-only when `true`.
    pub is_trigger: bool,
}

impl TriggerVolume {
    /// Creates an overlap-only box of the given size.
    #[must_use]
    pub const fn trigger(size: Vec2) -> Self {
        Self {
            size,
            is_trigger: true,
        }
    }
}

/// Behaviour of a detached limb: what it was and how long it has left.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct LimbBehaviour {
    /// The limb this entity represents.
    pub limb: Limb,
    /// Counts down to removal.
    pub lifetime: Timer,
}

impl LimbBehaviour {
    /// Creates a behaviour that expires after `alive_secs` seconds.
    #[must_use]
    pub fn init(limb: Limb, alive_secs: f32) -> Self {
        Self {
            limb,
            lifetime: Timer::from_seconds(alive_secs, TimerMode::Once),
        }
    }

    /// Advances the lifetime, returning `true` once it has run out.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.lifetime.tick(delta).is_finished()
    }
}

/// Behaviour of a limb wielded as a weapon.
///
/// Templates flagged with `weapon_behaviour` carry an unbound instance; the
/// weapon spawner binds it to an owner.
#[derive(Component, Reflect, Default, Debug, Clone, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct LimbWeapon {
    /// Entity wielding the weapon.
    pub owner: Option<Entity>,
    /// Limb the weapon was made from.
    pub limb: Option<Limb>,
}

impl LimbWeapon {
    /// Binds the weapon to its wielder and source limb.
    pub const fn init(&mut self, owner: Entity, limb: Limb) {
        self.owner = Some(owner);
        self.limb = Some(limb);
    }

    /// Whether [`LimbWeapon::init`] has run.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.owner.is_some() && self.limb.is_some()
    }
}
