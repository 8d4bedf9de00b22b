use crate::core::geometry::Vec2;
use crate::domain::entity::{EntityHandle, Tags};
use crate::systems::behaviors::{Intent, Message, RemovalReason};

use super::collect::run_unit;
use super::WorldCore;

/// Remove entities that died or left the playable area, or put them back at
/// their respawn point. Removed units get one last `Removed` message; only
/// the spawns they request in it survive (joined next tick).
pub(super) fn sweep(world: &mut WorldCore) {
    let bounds = world.config.bounds;
    let mut doomed: Vec<(EntityHandle, RemovalReason)> = Vec::new();
    let mut respawned: Vec<EntityHandle> = Vec::new();

    for (handle, attrs) in world.registry.iter_mut() {
        let reason = if attrs.hitpoints <= 0 {
            RemovalReason::Died
        } else if !bounds.contains_point(attrs.location) {
            RemovalReason::OutOfBounds
        } else {
            continue;
        };

        if let Some(respawn) = attrs.respawn {
            attrs.location = respawn.location;
            attrs.velocity = Vec2::zero();
            attrs.acceleration = Vec2::zero();
            attrs.hitpoints = respawn.hitpoints;
            attrs.tags.remove(Tags::GROUNDED);
            attrs.was_grounded = false;
            log::info!(
                "'{}' respawned at ({}, {}) after {reason:?}",
                attrs.name,
                respawn.location.x,
                respawn.location.y
            );
            respawned.push(handle);
        } else {
            doomed.push((handle, reason));
        }
    }

    for handle in respawned {
        world.integrator.reset_history(handle);
        world.stats.respawned += 1;
    }

    if doomed.is_empty() {
        return;
    }

    world.intents.clear();
    for &(handle, reason) in &doomed {
        if let Some(attrs) = world.registry.remove(handle) {
            log::debug!("'{}' removed ({reason:?})", attrs.name);
        }
        world.integrator.forget(handle);
        world.stats.removed += 1;

        let Some(mut unit) = world.units.remove(handle) else {
            continue;
        };
        if !run_unit(unit.as_mut(), handle, &Message::Removed(reason), &mut world.intents) {
            log::error!("unit of entity {handle:?} panicked while being removed");
            world.stats.unit_panics += 1;
        }
    }

    for (_, intent) in world.intents.drain(..) {
        match intent {
            Intent::Spawn(unit) => world.orphan_spawns.push(unit),
            _ => world.stats.intents_dropped += 1,
        }
    }

    let registry = &world.registry;
    world.pending.retain(|(handle, _)| registry.contains(*handle));
}
