//! Removal of detached limbs once their lifetime runs out.

use bevy::prelude::*;
use log::debug;

use crate::components::LimbBehaviour;

/// Ticks every detached limb's lifetime and despawns the expired ones.
pub fn expire_detached_limbs(
    mut commands: Commands,
    time: Res<Time>,
    mut limbs: Query<(Entity, &mut LimbBehaviour)>,
) {
    let delta = time.delta();
    for (entity, mut behaviour) in &mut limbs {
        if behaviour.tick(delta) {
            debug!("detached {:?} expired; despawning {entity}", behaviour.limb);
            commands.entity(entity).despawn();
        }
    }
}
