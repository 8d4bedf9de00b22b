use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::geometry::Vec2;
use crate::domain::entity::EntityHandle;
use crate::systems::behaviors::{Behavior, Intent, Message, UnitContext};

use super::commands;
use super::WorldCore;

/// Run one unit on one message, appending its intents to `intents`.
/// Returns false if the unit panicked; its partial intents are discarded.
pub(super) fn run_unit(
    unit: &mut dyn Behavior,
    handle: EntityHandle,
    msg: &Message,
    intents: &mut Vec<(EntityHandle, Intent)>,
) -> bool {
    let mark = intents.len();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let mut ctx = UnitContext::new(handle, intents);
        unit.on_message(msg, &mut ctx);
    }));
    if outcome.is_err() {
        intents.truncate(mark);
        return false;
    }
    true
}

fn deliver(world: &mut WorldCore, handle: EntityHandle, msg: &Message) {
    // Dead units (panicked earlier this tick) hear nothing more
    if !world.registry.get(handle).is_some_and(|a| a.hitpoints > 0) {
        return;
    }
    let Some(unit) = world.units.get_mut(handle) else {
        return;
    };
    if !run_unit(unit.as_mut(), handle, msg, &mut world.intents) {
        log::error!("unit of entity {handle:?} panicked; killing it");
        world.stats.unit_panics += 1;
        if let Some(attrs) = world.registry.get_mut(handle) {
            attrs.hitpoints = 0;
        }
    }
}

/// Deliver notifications and the last WorldState, then apply intents.
pub(super) fn collect(world: &mut WorldCore) -> Result<()> {
    world.intents.clear();

    let mut pending = std::mem::take(&mut world.pending);
    for (handle, msg) in pending.iter() {
        deliver(world, *handle, msg);
    }
    pending.clear();
    world.pending = pending;

    let state = Message::WorldState(Arc::clone(&world.state));
    let handles: Vec<EntityHandle> = world.units.keys().collect();
    for handle in handles {
        deliver(world, handle, &state);
    }

    for unit in std::mem::take(&mut world.orphan_spawns) {
        commands::join(world, unit)?;
        world.stats.spawned += 1;
    }

    apply_intents(world)
}

/// Apply the collected batch. Intents from senders that are gone or already
/// dead (KILLME earlier in the batch) are dropped.
fn apply_intents(world: &mut WorldCore) -> Result<()> {
    let mut intents = std::mem::take(&mut world.intents);
    let mut result = Ok(());

    for (from, intent) in intents.drain(..) {
        if result.is_err() {
            break;
        }
        let alive = world.registry.get(from).is_some_and(|a| a.hitpoints > 0);
        if !alive {
            world.stats.intents_dropped += 1;
            continue;
        }

        match intent {
            Intent::UpdateVector { angle, velocity } => {
                if !angle.is_finite() || !velocity.is_finite() {
                    log::warn!("dropping non-finite UPDATE_VECTOR ({angle}, {velocity}) from {from:?}");
                    world.stats.intents_dropped += 1;
                    continue;
                }
                if let Some(attrs) = world.registry.get_mut(from) {
                    attrs.angle = angle;
                    attrs.velocity = Vec2::from_angle_deg(angle) * velocity;
                }
            }
            Intent::KillMe => {
                if let Some(attrs) = world.registry.get_mut(from) {
                    attrs.hitpoints = 0;
                }
            }
            Intent::Damage { target, amount } => match world.registry.get_mut(target) {
                Some(attrs) => {
                    attrs.hitpoints = attrs.hitpoints.saturating_sub(amount);
                    world.pending.push((target, Message::Damage(amount)));
                }
                None => {
                    log::warn!("DAMAGE from {from:?} to unknown entity {target:?}; ignored");
                    world.stats.intents_dropped += 1;
                    continue;
                }
            },
            Intent::Spawn(unit) => match commands::join(world, unit) {
                Ok(_) => world.stats.spawned += 1,
                Err(err) => {
                    result = Err(err);
                    continue;
                }
            },
            Intent::Quit(code) => {
                log::info!("QUIT({code}) requested by {from:?}");
                world.quit.get_or_insert(code);
            }
        }
        world.stats.intents_applied += 1;
    }

    intents.clear();
    world.intents = intents;
    result
}
