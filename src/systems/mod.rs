//! Per-tick systems driven by the simulation coordinator

pub mod behaviors;
pub mod collision;
pub mod physics;
