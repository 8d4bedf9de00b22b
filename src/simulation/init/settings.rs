use super::perf_stats::TickStats;
use super::WorldCore;

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.perf_enabled = enabled;
}

pub(super) fn get_tick_stats(world: &WorldCore) -> TickStats {
    world.stats.clone()
}

pub(super) fn set_gravity(world: &mut WorldCore, gravity: f32) {
    if !gravity.is_finite() {
        log::warn!("ignoring non-finite gravity {gravity}");
        return;
    }
    world.config.gravity = gravity;
    world.integrator.set_gravity(gravity);
}

pub(super) fn frame_time_ms(world: &WorldCore) -> f64 {
    world.governor.target_ms()
}
