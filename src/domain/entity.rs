//! Entity attributes - the physical record the registry owns per entity

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::core::geometry::{Rect, Vec2};

new_key_type! {
    /// Stable generational handle; stale handles resolve to nothing.
    pub struct EntityHandle;
}

/// Small tag set stored as bits
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tags(u32);

impl Tags {
    /// Resting on a wall or another entity (re-derived every tick)
    pub const GROUNDED: u32 = 1 << 0;

    pub const fn empty() -> Self {
        Self(0)
    }

    #[inline]
    pub fn contains(&self, tag: u32) -> bool {
        self.0 & tag != 0
    }

    #[inline]
    pub fn insert(&mut self, tag: u32) {
        self.0 |= tag;
    }

    #[inline]
    pub fn remove(&mut self, tag: u32) {
        self.0 &= !tag;
    }
}

/// Where a respawning entity comes back instead of being removed
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Respawn {
    pub location: Vec2,
    pub hitpoints: i32,
}

/// Physical attributes of one entity.
///
/// A behavior unit hands these to the coordinator when it joins; afterwards
/// the registry copy is authoritative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attributes {
    pub name: String,
    /// World position; hitboxes are relative to it
    pub location: Vec2,
    /// Heading in degrees, set by UPDATE_VECTOR
    pub angle: f32,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// Solid body box
    pub passive: Rect,
    /// Attack reach box; inert unless both dimensions are positive
    pub active: Rect,
    pub hitpoints: i32,
    pub tags: Tags,
    /// Takes part in solid collision (walls and other physical entities)
    pub physical: bool,
    /// Included in world-state broadcasts
    pub public: bool,
    /// Affected by global gravity
    pub gravity: bool,
    /// Hitpoints removed per tick from every passive box the active box overlaps
    pub attack_damage: i32,
    pub respawn: Option<Respawn>,
    /// GROUNDED as of the end of the previous tick; drives ground friction
    #[serde(skip)]
    pub(crate) was_grounded: bool,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            name: String::new(),
            location: Vec2::zero(),
            angle: 0.0,
            velocity: Vec2::zero(),
            acceleration: Vec2::zero(),
            passive: Rect::empty(),
            active: Rect::empty(),
            hitpoints: 1,
            tags: Tags::empty(),
            physical: true,
            public: true,
            gravity: true,
            attack_damage: 1,
            respawn: None,
            was_grounded: false,
        }
    }
}

impl Attributes {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.location = Vec2::new(x, y);
        self
    }

    /// Passive box of the given size anchored at the location
    pub fn sized(mut self, w: f32, h: f32) -> Self {
        self.passive = Rect::new(0.0, 0.0, w, h);
        self
    }

    pub fn with_passive(mut self, passive: Rect) -> Self {
        self.passive = passive;
        self
    }

    pub fn with_active(mut self, active: Rect) -> Self {
        self.active = active;
        self
    }

    pub fn with_velocity(mut self, x: f32, y: f32) -> Self {
        self.velocity = Vec2::new(x, y);
        self
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_hitpoints(mut self, hitpoints: i32) -> Self {
        self.hitpoints = hitpoints;
        self
    }

    pub fn with_attack_damage(mut self, damage: i32) -> Self {
        self.attack_damage = damage;
        self
    }

    pub fn with_tag(mut self, tag: u32) -> Self {
        self.tags.insert(tag);
        self
    }

    pub fn respawning_at(mut self, x: f32, y: f32, hitpoints: i32) -> Self {
        self.respawn = Some(Respawn { location: Vec2::new(x, y), hitpoints });
        self
    }

    /// Passes through walls and entities
    pub fn non_physical(mut self) -> Self {
        self.physical = false;
        self
    }

    /// Hidden from broadcasts
    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    /// Ignores gravity
    pub fn floating(mut self) -> Self {
        self.gravity = false;
        self
    }

    pub fn is_grounded(&self) -> bool {
        self.tags.contains(Tags::GROUNDED)
    }

    /// Passive box in world space
    pub fn passive_world(&self) -> Rect {
        self.passive.translated(self.location)
    }

    /// Active box in world space
    pub fn active_world(&self) -> Rect {
        self.active.translated(self.location)
    }

    /// Repair state the collision kernels cannot digest.
    /// Returns true when something had to be fixed.
    pub(crate) fn sanitize(&mut self) -> bool {
        let mut fixed = false;
        let passive = self.passive.normalized();
        if passive != self.passive {
            self.passive = passive;
            fixed = true;
        }
        if !self.location.is_finite() {
            self.location = Vec2::zero();
            fixed = true;
        }
        if !self.velocity.is_finite() {
            self.velocity = Vec2::zero();
            fixed = true;
        }
        fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_insert_remove() {
        let mut attrs = Attributes::new("viking").with_tag(Tags::GROUNDED);
        assert!(attrs.is_grounded());
        attrs.tags.insert(Tags::GROUNDED);
        attrs.tags.remove(Tags::GROUNDED);
        assert!(!attrs.is_grounded());
        assert_eq!(attrs.tags, Tags::empty());
    }

    #[test]
    fn sanitize_normalizes_inverted_passive_box() {
        let mut attrs = Attributes::new("crate").with_passive(Rect::new(32.0, 0.0, -32.0, 16.0));
        assert!(attrs.sanitize());
        assert_eq!(attrs.passive, Rect::new(0.0, 0.0, 32.0, 16.0));
        assert!(!attrs.sanitize());
    }

    #[test]
    fn attributes_parse_with_defaults() {
        let attrs: Attributes =
            serde_json::from_str(r#"{"name":"Sheep","location":{"x":500,"y":0},"hitpoints":2}"#).unwrap();
        assert_eq!(attrs.name, "Sheep");
        assert_eq!(attrs.hitpoints, 2);
        assert!(attrs.physical && attrs.public && attrs.gravity);
    }
}
