//! World - per-frame coordinator of the brawler simulation
//!
//! One tick, in order:
//! 1. reset per-tick physics state (GROUNDED, acceleration, gravity)
//! 2. deliver notifications + the last WorldState to every unit, then apply
//!    the collected intents in one batch
//! 3. integrate motion
//! 4. resolve collisions (active hits once, then relaxation to convergence)
//! 5. remove or respawn dead and out-of-bounds entities
//! 6. publish the new WorldState and adapt the frame target
//!
//! The registry is only ever touched here; units see snapshots.

use std::sync::Arc;

use slotmap::SecondaryMap;

use crate::core::error::Result;
use crate::core::geometry::Rect;
use crate::core::registry::Registry;
use crate::domain::config::SimConfig;
use crate::domain::entity::{Attributes, EntityHandle};
use crate::domain::world_state::WorldState;
use crate::systems::behaviors::{Behavior, Intent, Message};
use crate::systems::collision::CollisionSystem;
use crate::systems::physics::{Integrator, Modifier};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "pacing/governor.rs"]
mod governor;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "commands/commands.rs"]
mod commands;
#[path = "step/collect.rs"]
mod collect;
#[path = "step/contacts.rs"]
mod contacts;
#[path = "step/lifecycle.rs"]
mod lifecycle;
#[path = "step/step.rs"]
mod step;
mod facade;

pub use facade::World;
pub use governor::FrameGovernor;
pub use perf_stats::TickStats;

use perf_timer::PerfTimer;

/// Where the coordinator currently is inside `tick`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickPhase {
    Idle,
    Collect,
    Integrate,
    Resolve,
    Lifecycle,
    Publish,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// A unit asked the game to stop
    Quit(i32),
}

/// The simulation world
pub struct WorldCore {
    config: SimConfig,
    registry: Registry,
    units: SecondaryMap<EntityHandle, Box<dyn Behavior>>,
    integrator: Integrator,
    collisions: CollisionSystem,
    walls: Vec<Rect>,
    governor: FrameGovernor,

    // Published snapshot of the last completed tick
    state: Arc<WorldState>,

    // Notifications for the next collect phase
    pending: Vec<(EntityHandle, Message)>,
    intents: Vec<(EntityHandle, Intent)>,
    // Spawns requested by units on their way out
    orphan_spawns: Vec<Box<dyn Behavior>>,

    phase: TickPhase,
    time_ms: f64,
    frame: u64,
    quit: Option<i32>,

    // Perf metrics
    perf_enabled: bool,
    stats: TickStats,
}

impl WorldCore {
    /// Create a world; fails if the config does not validate.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(init::create_world_core(config))
    }

    pub fn from_config_json(json: &str) -> Result<Self> {
        let config = SimConfig::from_json(json)?;
        Ok(init::create_world_core(config))
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Register a unit; its `join` attributes enter the registry immediately.
    pub fn join(&mut self, unit: Box<dyn Behavior>) -> Result<EntityHandle> {
        commands::join(self, unit)
    }

    pub fn join_unit(&mut self, unit: impl Behavior + 'static) -> Result<EntityHandle> {
        commands::join(self, Box::new(unit))
    }

    /// Register a logic-free entity (prop, obstacle, test fixture)
    pub fn register(&mut self, attributes: Attributes) -> Result<EntityHandle> {
        commands::register(self, attributes)
    }

    pub fn add_modifier(&mut self, handle: EntityHandle, modifier: Modifier) -> Result<()> {
        commands::add_modifier(self, handle, modifier)
    }

    /// Replace the level geometry
    pub fn set_walls(&mut self, walls: Vec<Rect>) {
        commands::set_walls(self, walls)
    }

    /// Level geometry as a JSON array of `{x, y, w, h}`; returns the wall count.
    pub fn load_walls_json(&mut self, json: &str) -> Result<usize> {
        commands::load_walls_json(self, json)
    }

    pub fn walls(&self) -> &[Rect] {
        &self.walls
    }

    /// Live registry record (coordinator-side view, not a snapshot)
    pub fn entity(&self, handle: EntityHandle) -> Option<&Attributes> {
        self.registry.get(handle)
    }

    pub fn entity_count(&self) -> usize {
        self.registry.len()
    }

    /// Last published WorldState
    pub fn state(&self) -> Arc<WorldState> {
        Arc::clone(&self.state)
    }

    /// Advance one frame
    pub fn tick(&mut self) -> Result<TickOutcome> {
        step::tick(self)
    }

    /// Tick until a unit quits, sleeping off the rest of each frame target.
    /// Returns the quit code.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run(&mut self, on_frame: impl FnMut(&WorldCore)) -> Result<i32> {
        step::run(self, on_frame)
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Simulated milliseconds elapsed
    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }

    /// Current adaptive frame target
    pub fn frame_time_ms(&self) -> f64 {
        settings::frame_time_ms(self)
    }

    pub fn phase(&self) -> TickPhase {
        self.phase
    }

    /// Enable or disable per-phase timings (counters are always collected)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Stats of the last tick
    pub fn stats(&self) -> TickStats {
        settings::get_tick_stats(self)
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        settings::set_gravity(self, gravity);
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
