use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::geometry::{Rect, Vec2};

/// How derivatives are folded into velocity and location.
/// One scheme applies to every entity in a simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntegrationScheme {
    /// new = old + d
    #[default]
    Euler,
    /// new = old + (d0 + 2*d1 + 2*d2 + d3) / 6 over the last four ticks
    Blend4,
}

/// Frame governor settings (milliseconds)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PacingConfig {
    pub target_ms: f64,
    pub min_ms: f64,
    pub step_ms: f64,
    /// Consecutive over/under-budget ticks before the target moves
    pub adapt_after: u32,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self { target_ms: 10.0, min_ms: 10.0, step_ms: 1.0, adapt_after: 1 }
    }
}

/// Simulation settings, loadable from JSON
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimConfig {
    /// Downward acceleration per tick
    pub gravity: f32,
    pub ground_friction: f32,
    pub air_friction: f32,
    /// Per-axis |v| cap for entities without their own velocity modifiers
    pub speed_limit: Vec2,
    /// Relaxation passes per tick (wall pass + entity pass)
    pub max_iterations: u32,
    /// Total adjustment below which resolution counts as converged
    pub epsilon: f32,
    /// Optional per-pass, per-axis cap on how far one entity is pushed
    pub max_push: Option<f32>,
    pub scheme: IntegrationScheme,
    /// Playable area; entities whose location leaves it are removed
    pub bounds: Rect,
    /// Registry capacity; None = unbounded
    pub max_entities: Option<usize>,
    pub pacing: PacingConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            ground_friction: 0.5,
            air_friction: 0.1,
            speed_limit: Vec2::new(10.0, 10_000.0),
            max_iterations: 20,
            epsilon: 0.01,
            max_push: None,
            scheme: IntegrationScheme::Euler,
            bounds: Rect::new(-100_000.0, -100_000.0, 200_000.0, 110_000.0),
            max_entities: None,
            pacing: PacingConfig::default(),
        }
    }
}

impl SimConfig {
    /// Top-down arena: no gravity, no friction, no speed cap
    pub fn top_down() -> Self {
        Self {
            gravity: 0.0,
            ground_friction: 0.0,
            air_friction: 0.0,
            speed_limit: Vec2::new(f32::MAX, f32::MAX),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<()> {
        let bad = |msg: &str| Err(SimError::InvalidConfig(msg.to_string()));
        if !self.gravity.is_finite() {
            return bad("gravity must be finite");
        }
        if !(self.ground_friction >= 0.0) || !(self.air_friction >= 0.0) {
            return bad("friction must be non-negative");
        }
        if !(self.speed_limit.x >= 0.0) || !(self.speed_limit.y >= 0.0) {
            return bad("speed limit must be non-negative");
        }
        if self.max_iterations == 0 {
            return bad("maxIterations must be at least 1");
        }
        if !(self.epsilon >= 0.0) {
            return bad("epsilon must be non-negative");
        }
        if matches!(self.max_push, Some(p) if !(p > 0.0)) {
            return bad("maxPush must be positive");
        }
        if !self.bounds.has_extent() {
            return bad("bounds must have positive size");
        }
        if self.max_entities == Some(0) {
            return bad("maxEntities must be at least 1");
        }
        let p = &self.pacing;
        if !(p.min_ms > 0.0) || !(p.target_ms >= p.min_ms) {
            return bad("pacing needs 0 < minMs <= targetMs");
        }
        if !(p.step_ms > 0.0) || p.adapt_after == 0 {
            return bad("pacing needs stepMs > 0 and adaptAfter >= 1");
        }
        Ok(())
    }
}
