//! Domain types: entity attributes, configuration, world snapshots

pub mod config;
pub mod entity;
pub mod world_state;

pub use config::{IntegrationScheme, PacingConfig, SimConfig};
pub use entity::{Attributes, EntityHandle, Respawn, Tags};
pub use world_state::{ActorSnapshot, WorldState};
