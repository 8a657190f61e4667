//! Detached limb and limb weapon spawning.
//!
//! [`LimbFactory`] is a system parameter: any system or observer can take one
//! and call [`LimbFactory::spawn_limb`] or [`LimbFactory::spawn_weapon`]. It
//! reads the settings and template resources, scans the scene for source limbs
//! and commits the assembled entity through `Commands`.

pub mod assembly;

use bevy::prelude::*;
use bevy_ecs::system::SystemParam;
use log::{debug, warn};

use crate::components::{LimbVisual, SourceLimb};
use crate::impulse::PhysicsFlags;
use crate::limb::Limb;
use crate::rng::LimbRng;
use crate::settings::LimbFactorySettings;
use crate::template::TemplateCatalog;

pub use assembly::{
    assemble_limb, assemble_weapon, find_source, world_placement, LimbAssembly, SourceMatch,
    WeaponAssembly,
};

/// Source limbs visible to the factory.
type SourceLimbQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Limb,
        &'static Transform,
        &'static GlobalTransform,
        Option<&'static LimbVisual>,
    ),
    With<SourceLimb>,
>;

/// Spawns detached limbs and limb weapons.
#[derive(SystemParam)]
pub struct LimbFactory<'w, 's> {
    commands: Commands<'w, 's>,
    settings: Res<'w, LimbFactorySettings>,
    templates: Res<'w, TemplateCatalog>,
    rng: ResMut<'w, LimbRng>,
    sources: SourceLimbQuery<'w, 's>,
    placements: Query<'w, 's, &'static GlobalTransform>,
}

impl LimbFactory<'_, '_> {
    /// Spawns a detached `limb` at `position`.
    ///
    /// When a [`SourceLimb`] with an equal [`Limb`] exists, the new entity
    /// takes over its world-space position and rotation, its local scale and
    /// its sprite; otherwise it appears at
    /// `position` with the default sprite for the limb's kind. `physics`
    /// selects which impulses the body receives.
    ///
    /// Returns `None` when the limb template cannot be instanced.
    pub fn spawn_limb(
        &mut self,
        limb: Limb,
        position: Vec3,
        physics: PhysicsFlags,
    ) -> Option<Entity> {
        let instance =
            self.templates
                .instantiate(&self.settings.limb_template, position, Quat::IDENTITY)?;
        let source = find_source(limb, self.sources.iter());
        let assembly = assemble_limb(
            instance,
            limb,
            source.as_ref(),
            physics,
            &self.settings,
            &mut *self.rng,
        );
        let entity = assembly.spawn(&mut self.commands);
        debug!(
            "spawned detached {limb:?} as {entity} ({})",
            if source.is_some() { "matched" } else { "default" }
        );
        Some(entity)
    }

    /// Spawns a weapon made from `limb`, bound to `owner`, at the owner's
    /// world-space position.
    ///
    /// Returns `None` when the owner has no transform, the weapon template
    /// cannot be instanced, or the template lacks a
    /// [`LimbWeapon`](crate::components::LimbWeapon).
    pub fn spawn_weapon(&mut self, owner: Entity, limb: Limb) -> Option<Entity> {
        let Ok(owner_placement) = self.placements.get(owner) else {
            warn!("cannot place limb weapon: owner {owner} has no transform");
            return None;
        };
        let instance = self.templates.instantiate(
            &self.settings.weapon_template,
            owner_placement.translation(),
            Quat::IDENTITY,
        )?;
        let Some(assembly) = assemble_weapon(instance, owner, limb, &self.settings) else {
            warn!(
                "weapon template {} has no LimbWeapon behaviour",
                self.settings.weapon_template
            );
            return None;
        };
        let entity = assembly.spawn(&mut self.commands);
        debug!("spawned {limb:?} weapon {entity} for {owner}");
        Some(entity)
    }

    /// Settings the factory spawns with.
    #[must_use]
    pub fn settings(&self) -> &LimbFactorySettings {
        &self.settings
    }
}
