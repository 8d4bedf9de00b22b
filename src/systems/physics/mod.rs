//! Physics System - per-entity motion integration
//!
//! Euler or Blend4 integration of acceleration into velocity and velocity
//! into location, with caller-registered modifiers around each stage.

mod forces;
mod integrator;

pub use forces::{apply_friction, apply_speed_limit, Modifier, ModifierFn, Stage};
pub use integrator::{DerivativeHistory, Integrator};
