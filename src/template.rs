//! Entity templates and their instancing.
//!
//! A template is a data blueprint loaded from the resource catalog. Instancing
//! one produces an [`Instance`]: a plain aggregate of optional components that
//! the factory configures before committing it to the world. Nothing touches
//! the ECS until the aggregate is complete.

use std::fmt;

use bevy::prelude::*;
use hashbrown::HashMap;
use log::warn;
use serde::Deserialize;

use crate::components::{LimbVisual, LimbWeapon, RigidBody2d, SpriteId};
use crate::DEFAULT_BODY_MASS;

/// Catalog key of a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(String);

impl TemplateId {
    /// Creates an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrows the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TemplateId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unscaled size of a template's collision bounds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Bounds {
    /// Width in world units.
    pub width: f32,
    /// Height in world units.
    pub height: f32,
}

impl Bounds {
    /// Bounds as a vector.
    #[must_use]
    pub const fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

const fn default_mass() -> f32 {
    DEFAULT_BODY_MASS
}

/// Rigid body blueprint.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BodyTemplate {
    /// Body mass in kilograms.
    #[serde(default = "default_mass")]
    pub mass: f32,
}

/// Sprite blueprint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VisualTemplate {
    /// Initial sprite, replaced by the factory for matched limbs.
    #[serde(default)]
    pub sprite: Option<SpriteId>,
    /// Initial horizontal mirroring.
    #[serde(default)]
    pub flip_x: bool,
    /// Initial vertical mirroring.
    #[serde(default)]
    pub flip_y: bool,
}

/// Blueprint for a spawned entity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntityTemplate {
    /// Catalog key.
    pub id: TemplateId,
    /// Debug name given to instances.
    pub name: String,
    /// Collision bounds before scaling.
    pub bounds: Bounds,
    /// Physics body, if instances should have one.
    #[serde(default)]
    pub body: Option<BodyTemplate>,
    /// Sprite, if instances should have one.
    #[serde(default)]
    pub visual: Option<VisualTemplate>,
    /// Whether instances carry an unbound [`LimbWeapon`].
    #[serde(default)]
    pub weapon_behaviour: bool,
}

impl EntityTemplate {
    /// Realises the template at `position` with `rotation`.
    #[must_use]
    pub fn instantiate(&self, position: Vec3, rotation: Quat) -> Instance {
        Instance {
            name: Name::new(self.name.clone()),
            transform: Transform::from_translation(position).with_rotation(rotation),
            body: self.body.map(|body| RigidBody2d::new(body.mass)),
            visual: self.visual.as_ref().map(|visual| LimbVisual {
                sprite: visual.sprite.clone(),
                flip_x: visual.flip_x,
                flip_y: visual.flip_y,
            }),
            bounds: self.bounds.as_vec2(),
            weapon: self.weapon_behaviour.then(LimbWeapon::default),
        }
    }
}

/// An instanced template awaiting configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// Debug name.
    pub name: Name,
    /// Placement in the scene.
    pub transform: Transform,
    /// Physics body, when the template has one.
    pub body: Option<RigidBody2d>,
    /// Sprite state, when the template has one.
    pub visual: Option<LimbVisual>,
    /// Collision bounds before scaling.
    pub bounds: Vec2,
    /// Weapon behaviour, when the template provides one.
    pub weapon: Option<LimbWeapon>,
}

impl Instance {
    /// Bounds scaled by the current transform.
    #[must_use]
    pub fn scaled_bounds(&self) -> Vec2 {
        self.bounds * self.transform.scale.truncate().abs()
    }
}

/// Templates available to the factory, keyed by identifier.
#[derive(Resource, Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: HashMap<TemplateId, EntityTemplate>,
}

impl TemplateCatalog {
    /// Adds `template`, returning any template it replaced.
    pub fn insert(&mut self, template: EntityTemplate) -> Option<EntityTemplate> {
        self.templates.insert(template.id.clone(), template)
    }

    /// Looks up a template.
    #[must_use]
    pub fn get(&self, id: &TemplateId) -> Option<&EntityTemplate> {
        self.templates.get(id)
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &TemplateId) -> bool {
        self.templates.contains_key(id)
    }

    /// Number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the catalog holds no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Instances template `id`.
    ///
    /// Returns `None` when the template is unknown or the position is not
    /// finite.
    #[must_use]
    pub fn instantiate(
        &self,
        id: &TemplateId,
        position: Vec3,
        rotation: Quat,
    ) -> Option<Instance> {
        let Some(template) = self.get(id) else {
            warn!("cannot instance unknown template {id}");
            return None;
        };
        if !position.is_finite() {
            warn!("cannot instance template {id} at non-finite position {position:?}");
            return None;
        }
        Some(template.instantiate(position, rotation))
    }
}

impl FromIterator<EntityTemplate> for TemplateCatalog {
    fn from_iter<I: IntoIterator<Item = EntityTemplate>>(iter: I) -> Self {
        let mut catalog = Self::default();
        for template in iter {
            catalog.insert(template);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn limb_template() -> EntityTemplate {
        EntityTemplate {
            id: TemplateId::new("limb"),
            name: "DetachedLimb".into(),
            bounds: Bounds {
                width: 0.5,
                height: 1.0,
            },
            body: Some(BodyTemplate { mass: 2.0 }),
            visual: Some(VisualTemplate::default()),
            weapon_behaviour: false,
        }
    }

    #[rstest]
    fn instance_uses_requested_placement(limb_template: EntityTemplate) {
        let position = Vec3::new(3.0, -2.0, 1.0);
        let instance = limb_template.instantiate(position, Quat::IDENTITY);
        assert_eq!(instance.transform.translation, position);
        assert_eq!(instance.transform.rotation, Quat::IDENTITY);
        assert_eq!(instance.transform.scale, Vec3::ONE);
        assert_eq!(instance.name.as_str(), "DetachedLimb");
        assert_eq!(instance.body, Some(RigidBody2d::new(2.0)));
        assert!(instance.weapon.is_none());
    }

    #[rstest]
    fn scaled_bounds_ignore_mirroring(limb_template: EntityTemplate) {
        let mut instance = limb_template.instantiate(Vec3::ZERO, Quat::IDENTITY);
        instance.transform.scale = Vec3::new(-2.0, 3.0, 1.0);
        assert_eq!(instance.scaled_bounds(), Vec2::new(1.0, 3.0));
    }

    #[rstest]
    fn weapon_templates_carry_unbound_behaviour(mut limb_template: EntityTemplate) {
        limb_template.weapon_behaviour = true;
        let instance = limb_template.instantiate(Vec3::ZERO, Quat::IDENTITY);
        assert_eq!(instance.weapon, Some(LimbWeapon::default()));
    }

    #[rstest]
    fn unknown_template_fails_to_instance(limb_template: EntityTemplate) {
        let catalog: TemplateCatalog = std::iter::once(limb_template).collect();
        assert!(catalog
            .instantiate(&TemplateId::new("missing"), Vec3::ZERO, Quat::IDENTITY)
            .is_none());
        assert!(catalog
            .instantiate(&TemplateId::new("limb"), Vec3::ZERO, Quat::IDENTITY)
            .is_some());
    }

    #[rstest]
    fn non_finite_position_fails_to_instance(limb_template: EntityTemplate) {
        let catalog: TemplateCatalog = std::iter::once(limb_template).collect();
        let position = Vec3::new(f32::NAN, 0.0, 0.0);
        assert!(catalog
            .instantiate(&TemplateId::new("limb"), position, Quat::IDENTITY)
            .is_none());
    }
}
