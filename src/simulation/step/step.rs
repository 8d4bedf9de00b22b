use std::sync::Arc;

use crate::core::error::Result;
use crate::domain::world_state::{ActorSnapshot, WorldState};

use super::{collect, contacts, lifecycle};
use super::{PerfTimer, TickOutcome, TickPhase, WorldCore};

pub(super) fn tick(world: &mut WorldCore) -> Result<TickOutcome> {
    if let Some(code) = world.quit {
        return Ok(TickOutcome::Quit(code));
    }

    let result = run_phases(world);
    world.phase = TickPhase::Idle;
    result?;

    world.frame += 1;
    Ok(match world.quit {
        Some(code) => TickOutcome::Quit(code),
        None => TickOutcome::Continue,
    })
}

fn run_phases(world: &mut WorldCore) -> Result<()> {
    let perf_on = world.perf_enabled;
    world.stats.reset();
    let mut timer = PerfTimer::start();
    let tick_time = world.time_ms;

    // === COLLECT ===
    world.phase = TickPhase::Collect;
    world.integrator.begin_tick(&mut world.registry);
    collect::collect(world)?;
    if perf_on {
        world.stats.collect_ms = timer.lap();
    }

    // === INTEGRATE ===
    world.phase = TickPhase::Integrate;
    world.integrator.integrate(&mut world.registry);
    if perf_on {
        world.stats.integrate_ms = timer.lap();
    }

    // === RESOLVE ===
    world.phase = TickPhase::Resolve;
    contacts::resolve_collisions(world);
    if perf_on {
        world.stats.resolve_ms = timer.lap();
    }

    // === LIFECYCLE ===
    world.phase = TickPhase::Lifecycle;
    lifecycle::sweep(world);
    if perf_on {
        world.stats.lifecycle_ms = timer.lap();
    }

    // === PUBLISH ===
    world.phase = TickPhase::Publish;
    publish(world, tick_time);
    if perf_on {
        world.stats.publish_ms = timer.lap();
    }

    world.time_ms += world.governor.target_ms();
    let elapsed = timer.elapsed_ms();
    world.governor.adapt(elapsed);

    world.stats.entity_count = world.registry.len() as u32;
    world.stats.frame_target_ms = world.governor.target_ms();
    if perf_on {
        world.stats.tick_ms = elapsed;
    }
    Ok(())
}

/// Snapshot every public entity. `time` is the start of this tick.
fn publish(world: &mut WorldCore, tick_time: f64) {
    let actors = world
        .registry
        .iter()
        .filter(|(_, attrs)| attrs.public)
        .map(|(handle, attrs)| ActorSnapshot::capture(handle, attrs))
        .collect();
    world.state = Arc::new(WorldState {
        time: tick_time,
        frame_duration: world.governor.target_ms() / 1000.0,
        actors,
    });
}

#[cfg(not(target_arch = "wasm32"))]
pub(super) fn run(world: &mut WorldCore, mut on_frame: impl FnMut(&WorldCore)) -> Result<i32> {
    loop {
        let timer = PerfTimer::start();
        let outcome = tick(world)?;
        on_frame(world);
        if let TickOutcome::Quit(code) = outcome {
            return Ok(code);
        }
        let remaining = world.governor.remaining_ms(timer.elapsed_ms());
        if remaining > 0.0 {
            std::thread::sleep(std::time::Duration::from_secs_f64(remaining / 1000.0));
        }
    }
}
