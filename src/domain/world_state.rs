//! WorldState - the read-only snapshot published once per tick
//!
//! Renderers, audio and behavior units all consume the same `Arc<WorldState>`;
//! nobody outside the coordinator ever sees the live registry.

use serde::Serialize;

use crate::core::geometry::{Rect, Vec2};
use crate::domain::entity::{Attributes, EntityHandle, Tags};

/// One public entity as seen by consumers
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorSnapshot {
    pub handle: EntityHandle,
    pub name: String,
    pub location: Vec2,
    pub angle: f32,
    pub velocity: Vec2,
    pub hitpoints: i32,
    pub physical: bool,
    pub public: bool,
    pub grounded: bool,
    pub passive: Rect,
    pub active: Rect,
}

impl ActorSnapshot {
    pub fn capture(handle: EntityHandle, attrs: &Attributes) -> Self {
        Self {
            handle,
            name: attrs.name.clone(),
            location: attrs.location,
            angle: attrs.angle,
            velocity: attrs.velocity,
            hitpoints: attrs.hitpoints,
            physical: attrs.physical,
            public: attrs.public,
            grounded: attrs.tags.contains(Tags::GROUNDED),
            passive: attrs.passive,
            active: attrs.active,
        }
    }

    /// Center of the passive box in world space
    pub fn center(&self) -> Vec2 {
        let p = self.passive.translated(self.location);
        Vec2::new(p.x + p.w * 0.5, p.y + p.h * 0.5)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldState {
    /// Simulated time at the start of the tick, milliseconds
    pub time: f64,
    /// Frame target in effect for the tick, seconds
    pub frame_duration: f64,
    pub actors: Vec<ActorSnapshot>,
}

impl WorldState {
    pub fn actor(&self, handle: EntityHandle) -> Option<&ActorSnapshot> {
        self.actors.iter().find(|a| a.handle == handle)
    }

    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.actor(handle).is_some()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
