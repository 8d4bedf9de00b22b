//! Per-tick structure-of-arrays view of the registry for the collision kernels.
//! Buffers keep their capacity between ticks.

use crate::core::geometry::{Rect, Vec2};
use crate::core::registry::Registry;
use crate::domain::entity::{EntityHandle, Tags};

use super::matrix::BoolMatrix;

/// What an entity (by scratch index) touched
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum ContactTarget {
    Entity(usize),
    Wall(usize),
}

/// Active box of `attacker` reached the passive box of `victim`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Hit {
    pub attacker: usize,
    pub victim: usize,
    pub amount: i32,
}

#[derive(Default)]
pub(crate) struct Scratch {
    pub handles: Vec<EntityHandle>,
    pub tl: Vec<Vec2>,
    pub br: Vec<Vec2>,
    pub active_tl: Vec<Vec2>,
    pub active_br: Vec<Vec2>,
    pub velocity: Vec<Vec2>,
    pub physical: Vec<bool>,
    pub attack_damage: Vec<i32>,
    pub grounded: Vec<bool>,
    /// Accumulated translation this tick
    pub shift: Vec<Vec2>,

    pub wall_tl: Vec<Vec2>,
    pub wall_br: Vec<Vec2>,

    pub passive: BoolMatrix,
    pub active: BoolMatrix,
    pub walls: BoolMatrix,

    pub contacts: Vec<(usize, ContactTarget)>,
    pub hits: Vec<Hit>,
    pub swaps: Vec<(usize, usize, usize)>,
}

impl Scratch {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Snapshot the registry (dense order) and the level walls
    pub fn gather(&mut self, registry: &Registry, walls: &[Rect]) {
        self.handles.clear();
        self.tl.clear();
        self.br.clear();
        self.active_tl.clear();
        self.active_br.clear();
        self.velocity.clear();
        self.physical.clear();
        self.attack_damage.clear();
        self.grounded.clear();
        self.shift.clear();
        self.contacts.clear();
        self.hits.clear();

        for (handle, attrs) in registry.iter() {
            let passive = attrs.passive_world();
            let active = attrs.active_world();
            self.handles.push(handle);
            self.tl.push(passive.top_left());
            self.br.push(passive.bottom_right());
            self.active_tl.push(active.top_left());
            self.active_br.push(active.bottom_right());
            self.velocity.push(attrs.velocity);
            self.physical.push(attrs.physical);
            self.attack_damage.push(attrs.attack_damage);
            self.grounded.push(attrs.is_grounded());
            self.shift.push(Vec2::zero());
        }

        self.wall_tl.clear();
        self.wall_br.clear();
        for wall in walls {
            self.wall_tl.push(wall.top_left());
            self.wall_br.push(wall.bottom_right());
        }
    }

    #[inline]
    pub fn translate(&mut self, i: usize, by: Vec2) {
        self.tl[i] += by;
        self.br[i] += by;
        self.active_tl[i] += by;
        self.active_br[i] += by;
        self.shift[i] += by;
    }

    /// Copy resolved locations, velocities and GROUNDED back.
    /// The registry must not have changed since `gather`.
    pub fn write_back(&self, registry: &mut Registry) {
        for (i, (handle, attrs)) in registry.iter_mut().enumerate() {
            debug_assert_eq!(self.handles[i], handle);
            attrs.location += self.shift[i];
            attrs.velocity = self.velocity[i];
            if self.grounded[i] {
                attrs.tags.insert(Tags::GROUNDED);
            } else {
                attrs.tags.remove(Tags::GROUNDED);
            }
        }
    }

    /// Sort and drop repeated (entity, target) pairs across passes
    pub fn dedup_contacts(&mut self) {
        self.contacts.sort_unstable();
        self.contacts.dedup();
    }
}
