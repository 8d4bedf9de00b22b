use crate::core::error::{Result, SimError};
use crate::core::geometry::Rect;
use crate::domain::entity::{Attributes, EntityHandle};
use crate::systems::behaviors::{Behavior, Inert};
use crate::systems::physics::Modifier;

use super::WorldCore;

pub(super) fn join(world: &mut WorldCore, mut unit: Box<dyn Behavior>) -> Result<EntityHandle> {
    let attributes = unit.join();
    let name = attributes.name.clone();
    let handle = world.registry.insert(attributes)?;
    world.units.insert(handle, unit);
    log::debug!("'{name}' joined as {handle:?}");
    Ok(handle)
}

pub(super) fn register(world: &mut WorldCore, attributes: Attributes) -> Result<EntityHandle> {
    join(world, Box::new(Inert::new(attributes)))
}

pub(super) fn add_modifier(world: &mut WorldCore, handle: EntityHandle, modifier: Modifier) -> Result<()> {
    if !world.registry.contains(handle) {
        return Err(SimError::UnknownEntity(handle));
    }
    if let Err(err) = modifier.validate() {
        log::warn!("rejecting modifier for {handle:?}: {err}");
        return Err(err);
    }
    world.integrator.add_modifier(handle, modifier);
    Ok(())
}

pub(super) fn set_walls(world: &mut WorldCore, walls: Vec<Rect>) {
    world.walls.clear();
    for wall in walls {
        let normalized = wall.normalized();
        if !normalized.has_extent() {
            log::warn!("skipping degenerate wall {wall:?}");
            continue;
        }
        if normalized != wall {
            log::warn!("wall {wall:?} had a negative size; normalized");
        }
        world.walls.push(normalized);
    }
}

pub(super) fn load_walls_json(world: &mut WorldCore, json: &str) -> Result<usize> {
    let walls: Vec<Rect> = serde_json::from_str(json)?;
    set_walls(world, walls);
    log::info!("loaded {} walls", world.walls.len());
    Ok(world.walls.len())
}
