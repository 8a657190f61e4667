//! Minimal Bevy apps running the limb factory.

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy::transform::TransformPlugin;
use limbfall::{
    Catalog, Limb, LimbFactory, LimbFactoryPlugin, LimbVisual, PhysicsFlags, SourceLimb,
};

/// Seed used by [`factory_app`].
pub const TEST_SEED: u64 = 42;

/// Creates an app with `MinimalPlugins` and the factory installed from
/// `catalog`, seeded with [`TEST_SEED`].
pub fn factory_app(catalog: Catalog) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(LimbFactoryPlugin::from_catalog(catalog).with_seed(TEST_SEED));
    app
}

/// Like [`factory_app`], with `TransformPlugin` propagating parented
/// transforms on every update.
pub fn hierarchy_app(catalog: Catalog) -> App {
    let mut app = factory_app(catalog);
    app.add_plugins(TransformPlugin);
    app
}

/// Spawns a root-level attached limb the factory can match against.
///
/// The global transform is set from `transform` directly, so no propagation
/// pass is needed before spawning.
pub fn spawn_source_limb(
    world: &mut World,
    limb: Limb,
    transform: Transform,
    visual: Option<LimbVisual>,
) -> Entity {
    let mut source = world.spawn((
        SourceLimb,
        limb,
        transform,
        GlobalTransform::from(transform),
    ));
    if let Some(visual) = visual {
        source.insert(visual);
    }
    source.id()
}

/// Runs [`LimbFactory::spawn_limb`] once against `world`.
///
/// # Panics
/// Panics if the factory system cannot run.
pub fn spawn_limb(
    world: &mut World,
    limb: Limb,
    position: Vec3,
    physics: PhysicsFlags,
) -> Option<Entity> {
    world
        .run_system_once(move |mut factory: LimbFactory| {
            factory.spawn_limb(limb, position, physics)
        })
        .unwrap_or_else(|e| panic!("factory system failed: {e}"))
}

/// Runs [`LimbFactory::spawn_weapon`] once against `world`.
///
/// # Panics
/// Panics if the factory system cannot run.
pub fn spawn_weapon(world: &mut World, owner: Entity, limb: Limb) -> Option<Entity> {
    world
        .run_system_once(move |mut factory: LimbFactory| factory.spawn_weapon(owner, limb))
        .unwrap_or_else(|e| panic!("factory system failed: {e}"))
}
