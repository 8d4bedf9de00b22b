//! Core building blocks shared by every system

pub mod error;
pub mod geometry;
pub mod logging;
pub mod random;
pub mod registry;

pub use error::{Result, SimError};
pub use geometry::{Rect, Vec2};
pub use registry::Registry;
