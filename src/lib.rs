//! Viking Engine - simulation core of a 2D side-scrolling brawler, in WASM
//!
//! Architecture:
//! - core/        - geometry, registry, errors, logging
//! - domain/      - entity attributes, config, world snapshots
//! - systems/     - physics integration, collision resolution, unit behaviors
//! - simulation/  - per-frame coordinator and the JS-facing `World`

pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine: panic hook and console logging
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::logging::init_console_logger(log::LevelFilter::Info);
    log::info!("Viking engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::{Rect, Registry, Result, SimError, Vec2};
pub use domain::{ActorSnapshot, Attributes, EntityHandle, IntegrationScheme, SimConfig, Tags, WorldState};
pub use simulation::{TickOutcome, TickPhase, TickStats, World, WorldCore};
pub use systems::behaviors::{Behavior, Intent, Message, RemovalReason, UnitContext};
pub use systems::collision::{Collider, CollisionReport};
pub use systems::physics::{Modifier, Stage};
