//! Bevy plugin wiring the limb factory into an app.
//!
//! The plugin loads the resource catalog once, inserts the settings,
//! templates and random source as resources, and registers observers that
//! turn [`LimbSevered`] and [`LimbWeaponRequested`] events into spawns.

use std::path::PathBuf;

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{error, info, warn};
use thiserror::Error;

use crate::factory::LimbFactory;
use crate::impulse::PhysicsFlags;
use crate::lifetime::expire_detached_limbs;
use crate::limb::Limb;
use crate::rng::LimbRng;
use crate::settings::{load_dir, Catalog};
use crate::DEFAULT_SETTINGS_DIR;

/// A character lost `limb` at `position`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LimbSevered {
    /// The limb that came off.
    pub limb: Limb,
    /// Where to spawn it when no source limb matches.
    pub position: Vec3,
    /// Impulses applied to the detached limb.
    pub physics: PhysicsFlags,
}

impl LimbSevered {
    /// Severs `limb` at `position` with every impulse enabled.
    #[must_use]
    pub fn new(limb: Limb, position: Vec3) -> Self {
        Self {
            limb,
            position,
            physics: PhysicsFlags::default(),
        }
    }

    /// Overrides the impulses applied.
    #[must_use]
    pub const fn with_physics(mut self, physics: PhysicsFlags) -> Self {
        self.physics = physics;
        self
    }
}

/// `owner` picked up `limb` to wield as a weapon.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimbWeaponRequested {
    /// Entity that wields the weapon.
    pub owner: Entity,
    /// The limb being wielded.
    pub limb: Limb,
}

/// Event raised when the factory cannot be installed.
///
/// Observers log these events so the failure stays visible even when the
/// caller ignores it.
#[derive(Event, Debug, Clone, Error)]
#[error("limb factory unavailable: {detail}")]
pub struct LimbFactoryError {
    /// Description of the underlying error.
    pub detail: String,
}

impl LimbFactoryError {
    /// Convenience constructor.
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone)]
enum CatalogSource {
    Directory(PathBuf),
    Loaded(Box<Catalog>),
}

/// Installs the limb factory.
#[derive(Debug, Clone)]
pub struct LimbFactoryPlugin {
    source: CatalogSource,
    seed: Option<u64>,
}

impl LimbFactoryPlugin {
    /// Loads the catalog from `dir` when the plugin is built.
    #[must_use]
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            source: CatalogSource::Directory(dir.into()),
            seed: None,
        }
    }

    /// Uses an already loaded catalog.
    #[must_use]
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            source: CatalogSource::Loaded(Box::new(catalog)),
            seed: None,
        }
    }

    /// Seeds the random source with `seed` instead of the clock.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn catalog(&self) -> Result<Catalog, LimbFactoryError> {
        match &self.source {
            CatalogSource::Directory(dir) => {
                load_dir(dir).map_err(|e| LimbFactoryError::new(e.to_string()))
            }
            CatalogSource::Loaded(catalog) => Ok(catalog.as_ref().clone()),
        }
    }
}

impl Default for LimbFactoryPlugin {
    fn default() -> Self {
        Self::from_dir(DEFAULT_SETTINGS_DIR)
    }
}

impl Plugin for LimbFactoryPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_factory_error);

        let catalog = match self.catalog() {
            Ok(catalog) => catalog,
            Err(e) => {
                app.world_mut().trigger(e);
                return;
            }
        };

        let rng = self.seed.map_or_else(LimbRng::from_clock, LimbRng::new);
        info!(
            "limb factory ready: {} templates, rng seed {}",
            catalog.templates.len(),
            rng.seed_value()
        );

        app.insert_resource(catalog.settings)
            .insert_resource(catalog.templates)
            .insert_resource(rng)
            .add_observer(spawn_severed_limb)
            .add_observer(spawn_requested_weapon)
            .add_systems(Update, expire_detached_limbs);
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_factory_error(event: On<LimbFactoryError>) {
    error!("{}", event.event());
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn spawn_severed_limb(event: On<LimbSevered>, mut factory: LimbFactory) {
    let LimbSevered {
        limb,
        position,
        physics,
    } = *event.event();
    if factory.spawn_limb(limb, position, physics).is_none() {
        warn!("failed to spawn detached {limb:?}");
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn spawn_requested_weapon(event: On<LimbWeaponRequested>, mut factory: LimbFactory) {
    let LimbWeaponRequested { owner, limb } = *event.event();
    if factory.spawn_weapon(owner, limb).is_none() {
        warn!("failed to spawn {limb:?} weapon for {owner}");
    }
}
