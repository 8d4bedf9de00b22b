use std::sync::Arc;

use slotmap::SecondaryMap;

use crate::core::registry::Registry;
use crate::domain::config::SimConfig;
use crate::domain::world_state::WorldState;
use crate::systems::collision::CollisionSystem;
use crate::systems::physics::Integrator;

use super::governor::FrameGovernor;
use super::perf_stats::TickStats;
use super::{TickPhase, WorldCore};

/// Build an empty world. `config` is expected to be validated.
pub(super) fn create_world_core(config: SimConfig) -> WorldCore {
    let governor = FrameGovernor::new(&config.pacing);
    let state = WorldState {
        time: 0.0,
        frame_duration: governor.target_ms() / 1000.0,
        actors: Vec::new(),
    };
    let capacity = config.max_entities.unwrap_or(64);

    WorldCore {
        registry: Registry::new(config.max_entities),
        units: SecondaryMap::with_capacity(capacity),
        integrator: Integrator::new(&config),
        collisions: CollisionSystem::new(&config),
        walls: Vec::new(),
        governor,
        state: Arc::new(state),
        pending: Vec::with_capacity(capacity),
        intents: Vec::with_capacity(capacity),
        orphan_spawns: Vec::new(),
        phase: TickPhase::Idle,
        time_ms: 0.0,
        frame: 0,
        quit: None,
        perf_enabled: false,
        stats: TickStats::default(),
        config,
    }
}
