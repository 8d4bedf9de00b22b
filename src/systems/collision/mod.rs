//! Collision System - batched overlap detection and iterative push-out
//!
//! Per tick:
//! 1. gather the registry into flat corner arrays
//! 2. active hits (once)
//! 3. wall pass + entity pass, repeated until the total adjustment drops
//!    below epsilon or the iteration ceiling is hit
//! 4. write locations, velocities and GROUNDED back
//!
//! Exhausting the ceiling is not an error: residual overlap carries into the
//! next tick.

mod matrix;
mod overlap;
mod resolve;
mod scratch;

pub use matrix::BoolMatrix;
pub use overlap::{active_passive_overlap, passive_passive_overlap, passive_wall_overlap};
pub use resolve::{complete_collision, resolve_one_against_many, Contact, Side};

use serde::Serialize;

use crate::core::geometry::Rect;
use crate::core::registry::Registry;
use crate::domain::config::SimConfig;
use crate::domain::entity::EntityHandle;

use resolve::{resolve_active_hits, resolve_passive_passive_collisions, resolve_wall_collisions};
use scratch::{ContactTarget, Scratch};

/// The other side of a contact
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Collider {
    Entity(EntityHandle),
    /// Index into the level geometry
    Wall(usize),
}

/// Everything one `resolve` call produced
#[derive(Clone, Debug, Default)]
pub struct CollisionReport {
    /// (entity, what it touched), one entry per distinct pair and direction
    pub contacts: Vec<(EntityHandle, Collider)>,
    /// (victim, damage) from active hits, already applied to hitpoints
    pub hits: Vec<(EntityHandle, i32)>,
    pub iterations: u32,
    pub exhausted: bool,
    /// Adjustment of the last pass
    pub residual: f32,
}

pub struct CollisionSystem {
    scratch: Scratch,
    max_iterations: u32,
    epsilon: f32,
    max_push: Option<f32>,
}

impl CollisionSystem {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            scratch: Scratch::default(),
            max_iterations: config.max_iterations.max(1),
            epsilon: config.epsilon,
            max_push: config.max_push,
        }
    }

    pub fn resolve(&mut self, registry: &mut Registry, walls: &[Rect]) -> CollisionReport {
        let s = &mut self.scratch;
        s.gather(registry, walls);

        let mut report = CollisionReport::default();

        resolve_active_hits(s);
        for hit in &s.hits {
            let victim = s.handles[hit.victim];
            if let Some(attrs) = registry.get_mut(victim) {
                attrs.hitpoints = attrs.hitpoints.saturating_sub(hit.amount);
            }
            report.hits.push((victim, hit.amount));
        }

        loop {
            report.iterations += 1;
            let adjustment =
                resolve_wall_collisions(s, self.max_push) + resolve_passive_passive_collisions(s);
            report.residual = adjustment;
            if adjustment < self.epsilon || adjustment == 0.0 {
                break;
            }
            if report.iterations >= self.max_iterations {
                report.exhausted = true;
                log::debug!(
                    "collision resolution hit the {} pass ceiling (residual {:.3})",
                    self.max_iterations,
                    adjustment
                );
                break;
            }
        }

        s.write_back(registry);

        s.dedup_contacts();
        report.contacts.reserve(s.contacts.len());
        for &(i, target) in &s.contacts {
            let other = match target {
                ContactTarget::Entity(j) => Collider::Entity(s.handles[j]),
                ContactTarget::Wall(w) => Collider::Wall(w),
            };
            report.contacts.push((s.handles[i], other));
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::Attributes;

    fn system() -> CollisionSystem {
        CollisionSystem::new(&SimConfig::default())
    }

    #[test]
    fn entity_sunk_into_floor_is_lifted_and_grounded() {
        let mut reg = Registry::new(None);
        let h = reg.insert(Attributes::new("box").at(0.0, 5.0).sized(10.0, 10.0).with_velocity(1.0, 3.0)).unwrap();
        let walls = [Rect::new(-100.0, 10.0, 200.0, 20.0)];

        let report = system().resolve(&mut reg, &walls);

        let attrs = reg.get(h).unwrap();
        assert_eq!(attrs.location.y, 0.0);
        assert_eq!(attrs.velocity.y, 0.0, "falling velocity is cancelled");
        assert_eq!(attrs.velocity.x, 1.0);
        assert!(attrs.is_grounded());
        assert_eq!(report.contacts, vec![(h, Collider::Wall(0))]);
        assert!(!report.exhausted);
    }

    #[test]
    fn non_physical_entities_pass_through() {
        let mut reg = Registry::new(None);
        let h = reg.insert(Attributes::new("ghost").at(0.0, 5.0).sized(10.0, 10.0).non_physical()).unwrap();
        let walls = [Rect::new(-100.0, 10.0, 200.0, 20.0)];

        let report = system().resolve(&mut reg, &walls);

        assert_eq!(reg.get(h).unwrap().location.y, 5.0);
        assert!(report.contacts.is_empty());
    }

    #[test]
    fn closing_pair_is_split_evenly_and_swaps_velocity() {
        let mut reg = Registry::new(None);
        let a = reg.insert(Attributes::new("a").at(0.0, 0.0).sized(32.0, 32.0).with_velocity(2.0, 0.0)).unwrap();
        let b = reg.insert(Attributes::new("b").at(28.0, 0.0).sized(32.0, 32.0).with_velocity(-2.0, 0.0)).unwrap();

        let report = system().resolve(&mut reg, &[]);

        let (ra, rb) = (reg.get(a).unwrap(), reg.get(b).unwrap());
        assert_eq!(ra.location.x, -2.0);
        assert_eq!(rb.location.x, 30.0);
        assert_eq!(ra.velocity.x, -2.0);
        assert_eq!(rb.velocity.x, 2.0);
        assert!(report.contacts.contains(&(a, Collider::Entity(b))));
        assert!(report.contacts.contains(&(b, Collider::Entity(a))));
    }

    #[test]
    fn separating_pair_is_left_alone() {
        let mut reg = Registry::new(None);
        let a = reg.insert(Attributes::new("a").at(0.0, 0.0).sized(32.0, 32.0).with_velocity(-1.0, 0.0)).unwrap();
        let b = reg.insert(Attributes::new("b").at(28.0, 0.0).sized(32.0, 32.0).with_velocity(1.0, 0.0)).unwrap();

        system().resolve(&mut reg, &[]);

        assert_eq!(reg.get(a).unwrap().location.x, 0.0);
        assert_eq!(reg.get(b).unwrap().location.x, 28.0);
        assert_eq!(reg.get(a).unwrap().velocity.x, -1.0);
    }

    #[test]
    fn stacked_entity_grounds_on_the_lower_one() {
        let mut reg = Registry::new(None);
        let top = reg.insert(Attributes::new("top").at(0.0, -9.0).sized(10.0, 10.0)).unwrap();
        let bottom = reg.insert(Attributes::new("bottom").at(0.0, 0.0).sized(10.0, 10.0)).unwrap();

        system().resolve(&mut reg, &[]);

        assert!(reg.get(top).unwrap().is_grounded());
        assert!(!reg.get(bottom).unwrap().is_grounded());
        let gap = reg.get(bottom).unwrap().location.y - reg.get(top).unwrap().location.y;
        assert!((gap - 10.0).abs() < 1e-4);
    }

    #[test]
    fn active_hit_damages_victim_once_per_tick() {
        let mut reg = Registry::new(None);
        let attacker = reg
            .insert(
                Attributes::new("viking")
                    .at(0.0, 0.0)
                    .sized(10.0, 10.0)
                    .with_active(Rect::new(10.0, 0.0, 20.0, 10.0))
                    .with_attack_damage(3),
            )
            .unwrap();
        let victim = reg.insert(Attributes::new("sheep").at(20.0, 0.0).sized(10.0, 10.0).with_hitpoints(5)).unwrap();

        let report = system().resolve(&mut reg, &[]);

        assert_eq!(reg.get(victim).unwrap().hitpoints, 2);
        assert_eq!(reg.get(attacker).unwrap().hitpoints, 1);
        assert_eq!(report.hits, vec![(victim, 3)]);
    }

    #[test]
    fn stacked_hits_saturate_hitpoints() {
        let mut reg = Registry::new(None);
        let heavy = |x: f32, reach: Rect| {
            Attributes::new("berserker").at(x, 0.0).sized(10.0, 10.0).with_active(reach).with_attack_damage(i32::MAX)
        };
        reg.insert(heavy(0.0, Rect::new(10.0, 0.0, 20.0, 10.0))).unwrap();
        reg.insert(heavy(40.0, Rect::new(-20.0, 0.0, 20.0, 10.0))).unwrap();
        let victim = reg.insert(Attributes::new("sheep").at(20.0, 0.0).sized(10.0, 10.0)).unwrap();

        let report = system().resolve(&mut reg, &[]);

        assert_eq!(report.hits, vec![(victim, i32::MAX), (victim, i32::MAX)]);
        assert_eq!(reg.get(victim).unwrap().hitpoints, i32::MIN);
    }

    #[test]
    fn ceiling_is_reported_not_fatal() {
        let config = SimConfig { max_iterations: 1, ..SimConfig::default() };
        let mut sys = CollisionSystem::new(&config);
        let mut reg = Registry::new(None);
        // Squeezed between two walls closer than its width
        let h = reg.insert(Attributes::new("squeezed").at(0.0, 0.0).sized(10.0, 10.0)).unwrap();
        let walls = [Rect::new(-10.0, -50.0, 12.0, 100.0), Rect::new(8.0, -50.0, 12.0, 100.0)];

        let report = sys.resolve(&mut reg, &walls);

        assert!(report.exhausted);
        assert_eq!(report.iterations, 1);
        assert!(reg.get(h).unwrap().location.is_finite());
    }

    #[test]
    fn push_clamp_limits_one_pass() {
        let config = SimConfig { max_push: Some(1.0), max_iterations: 1, ..SimConfig::default() };
        let mut sys = CollisionSystem::new(&config);
        let mut reg = Registry::new(None);
        let h = reg.insert(Attributes::new("box").at(0.0, 6.0).sized(10.0, 10.0)).unwrap();

        sys.resolve(&mut reg, &[Rect::new(-100.0, 10.0, 200.0, 20.0)]);

        assert_eq!(reg.get(h).unwrap().location.y, 5.0);
    }
}
