//! Headless demo: severs a few limbs from a sample fighter and reports what
//! the factory spawned.
use std::path::PathBuf;

use anyhow::Context;
use bevy::prelude::*;
use bevy::transform::TransformPlugin;
use clap::Parser;
use limbfall::settings::load_dir;
use limbfall::{
    init_logging, Limb, LimbBehaviour, LimbFactoryPlugin, LimbSevered, LimbVisual, LimbWeapon,
    LimbWeaponRequested, SourceLimb, SpriteId, DEFAULT_SETTINGS_DIR,
};
use log::{info, warn};

/// Detached limb spawning demo
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Directory holding the settings and template records
    #[arg(short, long, default_value = DEFAULT_SETTINGS_DIR)]
    settings: PathBuf,
    /// Fixed random seed; defaults to the clock
    #[arg(long)]
    seed: Option<u64>,
    /// Number of frames to simulate after severing
    #[arg(short, long, default_value_t = 10)]
    frames: u32,
}

fn spawn_fighter(world: &mut World) -> Entity {
    let fighter = world
        .spawn((Name::new("Fighter"), Transform::from_xyz(0.0, 1.0, 0.0)))
        .id();
    world.spawn((
        SourceLimb,
        Limb::arm(1),
        Transform::from_xyz(0.4, 0.2, 0.0).with_rotation(Quat::from_rotation_z(0.3)),
        ChildOf(fighter),
        LimbVisual {
            sprite: Some(SpriteId::new("sprites/fighter_arm.png")),
            flip_x: true,
            flip_y: false,
        },
    ));
    fighter
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if !init_logging(args.verbose) {
        warn!("a logger was already installed; --verbose has no effect");
    }

    let catalog = load_dir(&args.settings).with_context(|| {
        format!(
            "loading limb factory catalog from {}",
            args.settings.display()
        )
    })?;
    let plugin = match args.seed {
        Some(seed) => LimbFactoryPlugin::from_catalog(catalog).with_seed(seed),
        None => LimbFactoryPlugin::from_catalog(catalog),
    };

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, TransformPlugin))
        .add_plugins(plugin);

    let fighter = spawn_fighter(app.world_mut());
    // Propagate the fighter's transform to its attached arm.
    app.update();

    let world = app.world_mut();
    world.trigger(LimbSevered::new(Limb::arm(1), Vec3::new(0.0, 1.0, 0.0)));
    world.trigger(LimbSevered::new(Limb::leg(2), Vec3::new(0.0, 0.5, 0.0)));
    world.trigger(LimbWeaponRequested {
        owner: fighter,
        limb: Limb::arm(1),
    });

    for _ in 0..args.frames {
        app.update();
    }

    let scene = app.world_mut();
    let mut limbs = scene.query::<(&LimbBehaviour, &Transform, Option<&LimbVisual>)>();
    for (behaviour, transform, visual) in limbs.iter(scene) {
        info!(
            "detached {:?} at {} with sprite {:?}",
            behaviour.limb,
            transform.translation,
            visual.and_then(|v| v.sprite.as_ref()).map(SpriteId::as_str)
        );
    }
    let mut weapons = scene.query::<&LimbWeapon>();
    let bound = weapons.iter(scene).filter(|w| w.is_bound()).count();
    info!("{bound} limb weapon(s) bound");

    Ok(())
}
