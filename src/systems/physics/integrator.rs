use slotmap::SecondaryMap;

use crate::core::geometry::Vec2;
use crate::core::registry::Registry;
use crate::domain::config::{IntegrationScheme, SimConfig};
use crate::domain::entity::{Attributes, EntityHandle, Tags};

use super::forces::{apply_friction, apply_speed_limit, Modifier, Stage};

/// Rolling window of the last four derivatives on both axes
#[derive(Clone, Copy, Debug, Default)]
pub struct DerivativeHistory {
    samples: [Vec2; 4],
    primed: bool,
}

impl DerivativeHistory {
    /// Record `d` and return the blended step (d0 + 2*d1 + 2*d2 + d3) / 6.
    /// The first sample seeds all four slots.
    pub fn step(&mut self, d: Vec2) -> Vec2 {
        if self.primed {
            self.samples.rotate_left(1);
            self.samples[3] = d;
        } else {
            self.samples = [d; 4];
            self.primed = true;
        }
        let [d0, d1, d2, d3] = self.samples;
        (d0 + (d1 + d2) * 2.0 + d3) * (1.0 / 6.0)
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct MotionHistory {
    acceleration: DerivativeHistory,
    velocity: DerivativeHistory,
}

/// Moves every entity one tick forward.
///
/// Order per entity: acceleration modifiers, velocity integration, velocity
/// modifiers (or the configured friction and speed cap), location
/// integration, post-move modifiers.
pub struct Integrator {
    scheme: IntegrationScheme,
    gravity: f32,
    ground_friction: f32,
    air_friction: f32,
    speed_limit: Vec2,
    modifiers: SecondaryMap<EntityHandle, Vec<Modifier>>,
    history: SecondaryMap<EntityHandle, MotionHistory>,
}

impl Integrator {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            scheme: config.scheme,
            gravity: config.gravity,
            ground_friction: config.ground_friction,
            air_friction: config.air_friction,
            speed_limit: config.speed_limit,
            modifiers: SecondaryMap::new(),
            history: SecondaryMap::new(),
        }
    }

    pub fn scheme(&self) -> IntegrationScheme {
        self.scheme
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = gravity;
    }

    /// Callers check the handle against the registry first.
    pub fn add_modifier(&mut self, handle: EntityHandle, modifier: Modifier) {
        if let Some(entry) = self.modifiers.entry(handle) {
            entry.or_default().push(modifier);
        }
    }

    pub fn modifiers(&self, handle: EntityHandle) -> &[Modifier] {
        self.modifiers.get(handle).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Drop modifiers and history of a removed entity
    pub fn forget(&mut self, handle: EntityHandle) {
        self.modifiers.remove(handle);
        self.history.remove(handle);
    }

    /// Restart the derivative history (respawn)
    pub fn reset_history(&mut self, handle: EntityHandle) {
        self.history.remove(handle);
    }

    /// Start-of-tick reset: remember GROUNDED for friction, clear it,
    /// zero acceleration and apply gravity.
    pub fn begin_tick(&self, registry: &mut Registry) {
        for attrs in registry.values_mut() {
            attrs.was_grounded = attrs.is_grounded();
            attrs.tags.remove(Tags::GROUNDED);
            attrs.acceleration = Vec2::zero();
            if attrs.gravity {
                attrs.acceleration.y += self.gravity;
            }
        }
    }

    pub fn integrate(&mut self, registry: &mut Registry) {
        for (handle, attrs) in registry.iter_mut() {
            let mods = self.modifiers.get(handle).map(Vec::as_slice).unwrap_or(&[]);
            let mut history = match self.scheme {
                IntegrationScheme::Euler => None,
                IntegrationScheme::Blend4 => self.history.entry(handle).map(|e| e.or_default()),
            };

            run_stage(mods, Stage::Acceleration, attrs);

            let dv = match history.as_mut() {
                Some(h) => h.acceleration.step(attrs.acceleration),
                None => attrs.acceleration,
            };
            attrs.velocity += dv;

            if mods.iter().any(|m| m.stage() == Stage::Velocity) {
                run_stage(mods, Stage::Velocity, attrs);
            } else {
                let friction = if attrs.was_grounded { self.ground_friction } else { self.air_friction };
                apply_friction(&mut attrs.velocity.x, friction);
                apply_speed_limit(&mut attrs.velocity, self.speed_limit);
            }

            let dx = match history.as_mut() {
                Some(h) => h.velocity.step(attrs.velocity),
                None => attrs.velocity,
            };
            attrs.location += dx;

            run_stage(mods, Stage::PostMove, attrs);
        }
    }
}

#[inline]
fn run_stage(mods: &[Modifier], stage: Stage, attrs: &mut Attributes) {
    for m in mods.iter().filter(|m| m.stage() == stage) {
        m.apply(attrs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floating_config() -> SimConfig {
        SimConfig { gravity: 0.0, ..SimConfig::top_down() }
    }

    #[test]
    fn blend4_matches_euler_for_constant_derivative() {
        let mut h = DerivativeHistory::default();
        for _ in 0..6 {
            let out = h.step(Vec2::new(3.0, -1.5));
            assert!((out.x - 3.0).abs() < 1e-6 && (out.y + 1.5).abs() < 1e-6);
        }
    }

    #[test]
    fn blend4_weights_the_middle_samples() {
        let mut h = DerivativeHistory::default();
        h.step(Vec2::zero());
        let out = h.step(Vec2::new(6.0, 0.0));
        // [0, 0, 0, 6] -> 6 / 6
        assert!((out.x - 1.0).abs() < 1e-6);
        let out = h.step(Vec2::new(6.0, 0.0));
        // [0, 0, 6, 6] -> (12 + 6) / 6
        assert!((out.x - 3.0).abs() < 1e-6);
    }

    #[test]
    fn gravity_accumulates_under_euler() {
        let config = SimConfig::default();
        let mut integrator = Integrator::new(&config);
        let mut reg = Registry::new(None);
        let h = reg.insert(Attributes::new("rock")).unwrap();

        for _ in 0..3 {
            integrator.begin_tick(&mut reg);
            integrator.integrate(&mut reg);
        }

        let attrs = reg.get(h).unwrap();
        assert!((attrs.velocity.y - 2.4).abs() < 1e-5);
        assert!((attrs.location.y - (0.8 + 1.6 + 2.4)).abs() < 1e-5);
    }

    #[test]
    fn floating_entities_ignore_gravity() {
        let mut integrator = Integrator::new(&SimConfig::default());
        let mut reg = Registry::new(None);
        let h = reg.insert(Attributes::new("balloon").floating()).unwrap();
        integrator.begin_tick(&mut reg);
        integrator.integrate(&mut reg);
        assert_eq!(reg.get(h).unwrap().location, Vec2::zero());
    }

    #[test]
    fn begin_tick_clears_grounded_but_remembers_it() {
        let integrator = Integrator::new(&SimConfig::default());
        let mut reg = Registry::new(None);
        let h = reg.insert(Attributes::new("a").with_tag(Tags::GROUNDED)).unwrap();
        integrator.begin_tick(&mut reg);
        let attrs = reg.get(h).unwrap();
        assert!(!attrs.is_grounded());
        assert!(attrs.was_grounded);
    }

    #[test]
    fn registered_velocity_modifiers_replace_defaults() {
        let mut integrator = Integrator::new(&SimConfig::default());
        let mut reg = Registry::new(None);
        let h = reg.insert(Attributes::new("fast").floating().with_velocity(50.0, 0.0)).unwrap();
        integrator.add_modifier(h, Modifier::SpeedLimit(Vec2::new(30.0, 30.0)));

        integrator.begin_tick(&mut reg);
        integrator.integrate(&mut reg);

        // Default limit (10) and air friction are skipped
        assert_eq!(reg.get(h).unwrap().velocity.x, 30.0);
    }

    #[test]
    fn constant_velocity_without_forces() {
        let mut integrator = Integrator::new(&floating_config());
        let mut reg = Registry::new(None);
        let h = reg.insert(Attributes::new("drift").with_velocity(2.0, 1.0)).unwrap();
        for _ in 0..10 {
            integrator.begin_tick(&mut reg);
            integrator.integrate(&mut reg);
        }
        assert_eq!(reg.get(h).unwrap().location, Vec2::new(20.0, 10.0));
    }

    fn blend4_config() -> SimConfig {
        SimConfig { scheme: IntegrationScheme::Blend4, ..floating_config() }
    }

    fn step(integrator: &mut Integrator, reg: &mut Registry) {
        integrator.begin_tick(reg);
        integrator.integrate(reg);
    }

    #[test]
    fn blend4_drifts_at_constant_velocity() {
        let mut integrator = Integrator::new(&blend4_config());
        let mut reg = Registry::new(None);
        let h = reg.insert(Attributes::new("drift").with_velocity(2.0, -1.0)).unwrap();

        for _ in 0..5 {
            step(&mut integrator, &mut reg);
        }

        let attrs = reg.get(h).unwrap();
        assert_eq!(attrs.velocity, Vec2::new(2.0, -1.0));
        assert!((attrs.location.x - 10.0).abs() < 1e-4 && (attrs.location.y + 5.0).abs() < 1e-4);
        assert!(integrator.history.contains_key(h));
    }

    #[test]
    fn reset_history_reseeds_from_the_next_sample() {
        let mut integrator = Integrator::new(&blend4_config());
        let mut reg = Registry::new(None);
        let h = reg.insert(Attributes::new("viking").with_velocity(6.0, 0.0)).unwrap();
        for _ in 0..4 {
            step(&mut integrator, &mut reg);
        }

        let attrs = reg.get_mut(h).unwrap();
        attrs.location = Vec2::zero();
        attrs.velocity = Vec2::zero();
        integrator.reset_history(h);
        step(&mut integrator, &mut reg);

        // Stale samples would blend to (6 + 12 + 12) / 6 = 5 px
        assert_eq!(reg.get(h).unwrap().location, Vec2::zero());
    }

    #[test]
    fn forget_drops_history_and_modifiers() {
        let mut integrator = Integrator::new(&blend4_config());
        let mut reg = Registry::new(None);
        let h = reg.insert(Attributes::new("gone").with_velocity(1.0, 0.0)).unwrap();
        integrator.add_modifier(h, Modifier::GroundLimit(100.0));
        step(&mut integrator, &mut reg);
        assert!(integrator.history.contains_key(h));

        integrator.forget(h);

        assert!(!integrator.history.contains_key(h));
        assert!(integrator.modifiers(h).is_empty());
    }
}
