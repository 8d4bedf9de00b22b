use crate::core::geometry::Vec2;
use crate::domain::entity::Attributes;
use crate::systems::collision::Collider;

use super::{Behavior, Message, UnitContext};

const MINE_DAMAGE: i32 = 25;
const EXPLOSION_LIFETIME_MS: f64 = 3000.0;

/// Sits still; damages whatever touches it and disappears
pub struct Mine {
    location: Vec2,
}

impl Mine {
    pub fn new(location: Vec2) -> Self {
        Self { location }
    }
}

impl Behavior for Mine {
    fn join(&mut self) -> Attributes {
        Attributes::new("Mine").at(self.location.x, self.location.y).sized(2.0, 2.0).floating()
    }

    fn on_message(&mut self, msg: &Message, ctx: &mut UnitContext<'_>) {
        if let Message::Collision { other, .. } = msg {
            // Walls take no damage; the mine is spent either way
            if let Collider::Entity(target) = *other {
                ctx.damage(target, MINE_DAMAGE);
            }
            ctx.kill_me();
        }
    }
}

/// Decorative blast, gone a few seconds after it first sees the world
pub struct Explosion {
    location: Vec2,
    angle: f32,
    started: Option<f64>,
}

impl Explosion {
    pub fn new(location: Vec2, angle: f32) -> Self {
        Self { location, angle, started: None }
    }
}

impl Behavior for Explosion {
    fn join(&mut self) -> Attributes {
        Attributes::new("Explosion")
            .at(self.location.x, self.location.y)
            .sized(32.0, 32.0)
            .with_angle(self.angle)
            .non_physical()
            .floating()
    }

    fn on_message(&mut self, msg: &Message, ctx: &mut UnitContext<'_>) {
        if let Message::WorldState(state) = msg {
            match self.started {
                None => self.started = Some(state.time),
                Some(start) if state.time >= start + EXPLOSION_LIFETIME_MS => ctx.kill_me(),
                Some(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::world_state::WorldState;
    use crate::systems::behaviors::{test_handle, Intent};

    fn at(time: f64) -> Message {
        Message::WorldState(Arc::new(WorldState { time, frame_duration: 0.01, actors: Vec::new() }))
    }

    #[test]
    fn mine_damages_entities_but_not_walls() {
        let me = test_handle(1);
        let victim = test_handle(2);

        let mut mine = Mine::new(Vec2::zero());
        let mut intents = Vec::new();
        mine.on_message(&Message::Collision { me, other: Collider::Entity(victim) }, &mut UnitContext::new(me, &mut intents));
        assert!(matches!(intents[0].1, Intent::Damage { target, amount: 25 } if target == victim));
        assert!(matches!(intents[1].1, Intent::KillMe));

        intents.clear();
        mine.on_message(&Message::Collision { me, other: Collider::Wall(3) }, &mut UnitContext::new(me, &mut intents));
        assert!(matches!(intents.as_slice(), [(_, Intent::KillMe)]));
    }

    #[test]
    fn explosion_expires_after_lifetime() {
        let me = test_handle(1);
        let mut boom = Explosion::new(Vec2::zero(), 0.0);
        assert!(!boom.join().physical);

        let mut intents = Vec::new();
        for t in [500.0, 1500.0, 3499.0] {
            boom.on_message(&at(t), &mut UnitContext::new(me, &mut intents));
        }
        assert!(intents.is_empty());

        boom.on_message(&at(3500.0), &mut UnitContext::new(me, &mut intents));
        assert!(matches!(intents.as_slice(), [(_, Intent::KillMe)]));
    }
}
