use crate::systems::behaviors::Message;

use super::WorldCore;

/// Collision phase: resolve, then queue COLLISION / DAMAGE notifications
/// for the next collect phase.
pub(super) fn resolve_collisions(world: &mut WorldCore) {
    let report = world.collisions.resolve(&mut world.registry, &world.walls);

    world.stats.iterations = report.iterations;
    world.stats.exhausted = report.exhausted;
    world.stats.residual = report.residual;
    world.stats.contacts = report.contacts.len() as u32;
    world.stats.active_hits = report.hits.len() as u32;

    world.pending.reserve(report.contacts.len() + report.hits.len());
    for (me, other) in report.contacts {
        world.pending.push((me, Message::Collision { me, other }));
    }
    for (victim, amount) in report.hits {
        world.pending.push((victim, Message::Damage(amount)));
    }
}
