#![cfg_attr(docsrs, feature(doc_cfg))]
//! Detached limb spawning for a 2D brawler.
//!
//! When a character loses a limb, [`LimbFactory::spawn_limb`] drops a
//! physical copy of it into the scene: matched to the still-attached source
//! limb when one exists, pushed and spun by a random impulse, and despawned
//! after a fixed lifetime. [`LimbFactory::spawn_weapon`] turns a limb into a
//! weapon bound to its wielder. [`LimbFactoryPlugin`] wires both into a Bevy
//! app from a catalog of JSON settings and template records.
pub mod components;
pub mod constants;
pub mod factory;
pub mod impulse;
pub mod lifetime;
pub mod limb;
pub mod logging;
pub mod plugin;
pub mod rng;
pub mod settings;
pub mod template;
pub use constants::*;

// Re-export commonly used items
pub use components::{
    LimbBehaviour, LimbVisual, LimbWeapon, RigidBody2d, SourceLimb, SpriteId, TriggerVolume,
};
pub use factory::LimbFactory;
pub use impulse::{rotation_value, translation_component, PhysicsFlags};
pub use lifetime::expire_detached_limbs;
pub use limb::{Limb, LimbId, LimbKind};
pub use logging::init as init_logging;
pub use plugin::{LimbFactoryError, LimbFactoryPlugin, LimbSevered, LimbWeaponRequested};
pub use rng::{LimbRng, RandomSource};
pub use settings::{Catalog, LimbFactorySettings, SettingsError, TranslationSign};
pub use template::{EntityTemplate, Instance, TemplateCatalog, TemplateId};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use limbfall::prelude::*;
    //! ```

    pub use crate::Limb;
    pub use crate::LimbFactory;
    pub use crate::LimbFactoryPlugin;
    pub use crate::LimbKind;
    pub use crate::LimbSevered;
    pub use crate::LimbWeaponRequested;
    pub use crate::PhysicsFlags;
    pub use crate::SourceLimb;
}
