use crate::core::geometry::Vec2;
use crate::core::random::{unit_f32, xorshift32};
use crate::domain::entity::Attributes;

use super::robot::{BasicRobot, MineDropper};
use super::{Behavior, Message, UnitContext};

const FIRST_SPAWN_DELAY_MS: f64 = 500.0;
const SPAWN_INTERVAL_MS: f64 = 1000.0;

/// Drops a random robot at its location once per second
pub struct Spawner {
    location: Vec2,
    next: Option<f64>,
    rng: u32,
}

impl Spawner {
    pub fn new(location: Vec2, seed: u32) -> Self {
        Self { location, next: None, rng: seed }
    }

    fn spawn_robot(&mut self, ctx: &mut UnitContext<'_>) {
        let angle = unit_f32(&mut self.rng) * 360.0;
        let velocity = unit_f32(&mut self.rng) + 2.0;
        let hitpoints = (unit_f32(&mut self.rng) * 15.0 + 15.0) as i32;
        if unit_f32(&mut self.rng) < 0.5 {
            let seed = xorshift32(&mut self.rng);
            ctx.spawn(BasicRobot::new(self.location, angle, velocity, hitpoints).with_seed(seed));
        } else {
            ctx.spawn(MineDropper::new(self.location, angle, velocity, hitpoints));
        }
    }
}

impl Behavior for Spawner {
    fn join(&mut self) -> Attributes {
        Attributes::new("Spawner")
            .at(self.location.x, self.location.y)
            .sized(32.0, 32.0)
            .non_physical()
            .floating()
    }

    fn on_message(&mut self, msg: &Message, ctx: &mut UnitContext<'_>) {
        let Message::WorldState(state) = msg else {
            return;
        };
        match self.next {
            None => self.next = Some(state.time + FIRST_SPAWN_DELAY_MS),
            Some(due) if state.time >= due => {
                self.next = Some(state.time + SPAWN_INTERVAL_MS);
                self.spawn_robot(ctx);
            }
            Some(_) => {}
        }
    }
}

/// No logic at all; joins with fixed attributes (props, test fixtures)
pub struct Inert {
    attributes: Attributes,
}

impl Inert {
    pub fn new(attributes: Attributes) -> Self {
        Self { attributes }
    }
}

impl Behavior for Inert {
    fn join(&mut self) -> Attributes {
        self.attributes.clone()
    }

    fn on_message(&mut self, _msg: &Message, _ctx: &mut UnitContext<'_>) {}
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::world_state::WorldState;
    use crate::systems::behaviors::{test_handle, Intent};

    #[test]
    fn spawner_waits_then_spawns_every_second() {
        let me = test_handle(1);
        let mut spawner = Spawner::new(Vec2::new(50.0, 50.0), 7);
        assert!(!spawner.join().physical);

        let mut spawn_times = Vec::new();
        for tick in 0..260 {
            let time = tick as f64 * 10.0;
            let msg = Message::WorldState(Arc::new(WorldState { time, frame_duration: 0.01, actors: Vec::new() }));
            let mut intents = Vec::new();
            spawner.on_message(&msg, &mut UnitContext::new(me, &mut intents));
            if intents.iter().any(|(_, i)| matches!(i, Intent::Spawn(_))) {
                spawn_times.push(time);
            }
        }
        assert_eq!(spawn_times, vec![500.0, 1500.0, 2500.0]);
    }

    #[test]
    fn spawned_robots_have_randomized_stats_in_range() {
        let me = test_handle(1);
        let mut spawner = Spawner::new(Vec2::zero(), 99);
        for _ in 0..20 {
            let mut intents = Vec::new();
            spawner.spawn_robot(&mut UnitContext::new(me, &mut intents));
            let Some((_, Intent::Spawn(mut unit))) = intents.pop() else {
                panic!("expected a spawn");
            };
            let attrs = unit.join();
            assert!((15..30).contains(&attrs.hitpoints));
            let speed = attrs.velocity.length();
            assert!((2.0..3.0001).contains(&speed), "speed {speed}");
        }
    }

    #[test]
    fn inert_joins_with_given_attributes() {
        let mut prop = Inert::new(Attributes::new("Barrel").at(3.0, 4.0));
        assert_eq!(prop.join().location, Vec2::new(3.0, 4.0));
    }
}
