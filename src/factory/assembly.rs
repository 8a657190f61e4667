//! World-independent configuration of instanced templates.
//!
//! These functions take an [`Instance`] plus whatever was read from the scene
//! and return a finished aggregate. Committing the aggregate is the only step
//! that touches the ECS.

use bevy::prelude::*;

use crate::components::{LimbBehaviour, LimbVisual, LimbWeapon, TriggerVolume};
use crate::impulse::{rotation_value, translation_component, PhysicsFlags};
use crate::limb::Limb;
use crate::rng::RandomSource;
use crate::settings::LimbFactorySettings;
use crate::template::Instance;

/// Transform and visual state copied from a matching source limb.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMatch {
    /// World-space placement of the source limb.
    pub transform: Transform,
    /// Sprite state of the source limb, when it has one.
    pub visual: Option<LimbVisual>,
}

/// World-space placement of an attached entity.
///
/// Translation and rotation come from `global`; scale stays the local one so
/// a parent's scale does not grow the detached copy.
#[must_use]
pub fn world_placement(local: &Transform, global: &GlobalTransform) -> Transform {
    let (_, rotation, translation) = global.to_scale_rotation_translation();
    Transform {
        translation,
        rotation,
        scale: local.scale,
    }
}

/// Picks the source limb equal to `limb`.
///
/// When several match, the last one in iteration order wins.
pub fn find_source<'a, I>(limb: Limb, sources: I) -> Option<SourceMatch>
where
    I: IntoIterator<
        Item = (
            &'a Limb,
            &'a Transform,
            &'a GlobalTransform,
            Option<&'a LimbVisual>,
        ),
    >,
{
    sources
        .into_iter()
        .filter(|(candidate, ..)| **candidate == limb)
        .last()
        .map(|(_, local, global, visual)| SourceMatch {
            transform: world_placement(local, global),
            visual: visual.cloned(),
        })
}

/// A fully configured detached limb, ready to spawn.
#[derive(Debug, Clone)]
pub struct LimbAssembly {
    /// The configured instance.
    pub instance: Instance,
    /// Overlap-only collision box.
    pub collider: TriggerVolume,
    /// Lifetime behaviour.
    pub behaviour: LimbBehaviour,
}

impl LimbAssembly {
    /// Spawns the limb and returns its entity.
    pub fn spawn(self, commands: &mut Commands) -> Entity {
        let Instance {
            name,
            transform,
            body,
            visual,
            weapon,
            ..
        } = self.instance;
        let mut entity = commands.spawn((name, transform, self.collider, self.behaviour));
        if let Some(body) = body {
            entity.insert(body);
        }
        if let Some(visual) = visual {
            entity.insert(visual);
        }
        if let Some(weapon) = weapon {
            entity.insert(weapon);
        }
        entity.id()
    }
}

/// Configures a detached limb instance.
///
/// A matching source replaces the whole transform with its world placement
/// and, when it has a visual,
/// the sprite and mirroring. Without a match the default sprite for the
/// limb's kind is used. Bodies receive the impulses selected by `flags`;
/// instances without a body or visual skip those steps.
pub fn assemble_limb<R>(
    mut instance: Instance,
    limb: Limb,
    source: Option<&SourceMatch>,
    flags: PhysicsFlags,
    settings: &LimbFactorySettings,
    rng: &mut R,
) -> LimbAssembly
where
    R: RandomSource + ?Sized,
{
    if let Some(matched) = source {
        instance.transform = matched.transform;
    }

    if let Some(body) = instance.body.as_mut() {
        if flags.contains(PhysicsFlags::TRANSLATE) {
            let x = translation_component(settings, rng);
            let y = translation_component(settings, rng);
            body.apply_force(Vec3::new(x, y, 0.0));
        }
        if flags.contains(PhysicsFlags::ROTATE) {
            body.apply_torque(rotation_value(settings, rng));
        }
    }

    if let Some(visual) = instance.visual.as_mut() {
        match source {
            Some(SourceMatch {
                visual: Some(matched),
                ..
            }) => visual.clone_from(matched),
            // Matched a source without a sprite: keep the template's.
            Some(_) => {}
            None => {
                if let Some(sprite) = settings.limb_sprites.for_kind(limb.kind) {
                    visual.sprite = Some(sprite.clone());
                }
            }
        }
    }

    let collider = TriggerVolume::trigger(instance.scaled_bounds());
    let behaviour = LimbBehaviour::init(limb, settings.alive_time);
    LimbAssembly {
        instance,
        collider,
        behaviour,
    }
}

/// A fully configured limb weapon, ready to spawn.
#[derive(Debug, Clone)]
pub struct WeaponAssembly {
    /// The configured instance, without its weapon behaviour.
    pub instance: Instance,
    /// Overlap-only collision box.
    pub collider: TriggerVolume,
    /// Bound weapon behaviour.
    pub weapon: LimbWeapon,
}

impl WeaponAssembly {
    /// Spawns the weapon and returns its entity.
    pub fn spawn(self, commands: &mut Commands) -> Entity {
        let Instance {
            name,
            transform,
            body,
            visual,
            ..
        } = self.instance;
        let mut entity = commands.spawn((name, transform, self.collider, self.weapon));
        if let Some(body) = body {
            entity.insert(body);
        }
        if let Some(visual) = visual {
            entity.insert(visual);
        }
        entity.id()
    }
}

/// Configures a limb weapon instance and binds it to `owner`.
///
/// Returns `None` when the template did not provide a [`LimbWeapon`].
pub fn assemble_weapon(
    mut instance: Instance,
    owner: Entity,
    limb: Limb,
    settings: &LimbFactorySettings,
) -> Option<WeaponAssembly> {
    if let Some(visual) = instance.visual.as_mut() {
        if let Some(sprite) = settings.weapon_sprites.for_kind(limb.kind) {
            visual.sprite = Some(sprite.clone());
        }
    }

    let collider = TriggerVolume::trigger(instance.scaled_bounds());
    let mut weapon = instance.weapon.take()?;
    weapon.init(owner, limb);
    Some(WeaponAssembly {
        instance,
        collider,
        weapon,
    })
}
