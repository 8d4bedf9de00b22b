//! Behaviors - per-entity decision logic
//!
//! A unit owns no physical state. It joins with a set of `Attributes`,
//! then reacts to coordinator messages by queueing intents through its
//! `UnitContext`. Intents are applied only after every unit has run, so all
//! units of a tick observe the same world.

mod messages;
mod ordnance;
mod robot;
mod spawner;

pub use messages::{Intent, Message, RemovalReason};
pub use ordnance::{Explosion, Mine};
pub use robot::{BasicRobot, MineDropper};
pub use spawner::{Inert, Spawner};

use crate::domain::entity::{Attributes, EntityHandle};

/// Intent buffer handed to one unit for one message
pub struct UnitContext<'a> {
    me: EntityHandle,
    intents: &'a mut Vec<(EntityHandle, Intent)>,
}

impl<'a> UnitContext<'a> {
    pub fn new(me: EntityHandle, intents: &'a mut Vec<(EntityHandle, Intent)>) -> Self {
        Self { me, intents }
    }

    #[inline]
    pub fn me(&self) -> EntityHandle {
        self.me
    }

    #[inline]
    fn push(&mut self, intent: Intent) {
        self.intents.push((self.me, intent));
    }

    /// Heading in degrees and speed; velocity becomes heading * speed
    pub fn update_vector(&mut self, angle: f32, velocity: f32) {
        self.push(Intent::UpdateVector { angle, velocity });
    }

    pub fn kill_me(&mut self) {
        self.push(Intent::KillMe);
    }

    pub fn damage(&mut self, target: EntityHandle, amount: i32) {
        self.push(Intent::Damage { target, amount });
    }

    pub fn spawn(&mut self, unit: impl Behavior + 'static) {
        self.push(Intent::Spawn(Box::new(unit)));
    }

    pub fn quit(&mut self, code: i32) {
        self.push(Intent::Quit(code));
    }
}

/// Behavior trait - every unit kind implements this
pub trait Behavior {
    /// Initial attributes, read once when the unit joins
    fn join(&mut self) -> Attributes;

    /// Must not block; runs to completion before the tick advances
    fn on_message(&mut self, msg: &Message, ctx: &mut UnitContext<'_>);
}

/// Keep an angle in [0, 360)
#[inline]
pub(crate) fn wrap_degrees(angle: f32) -> f32 {
    let a = angle % 360.0;
    if a < 0.0 {
        a + 360.0
    } else {
        a
    }
}

#[cfg(test)]
pub(crate) fn test_handle(index: u32) -> EntityHandle {
    EntityHandle::from(slotmap::KeyData::from_ffi(1 << 32 | index as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_tags_intents_with_sender() {
        let me = test_handle(7);
        let other = test_handle(9);
        let mut intents = Vec::new();
        let mut ctx = UnitContext::new(me, &mut intents);
        ctx.update_vector(90.0, 2.0);
        ctx.damage(other, 5);
        ctx.kill_me();

        assert_eq!(intents.len(), 3);
        assert!(intents.iter().all(|(from, _)| *from == me));
        assert!(matches!(intents[1].1, Intent::Damage { target, amount: 5 } if target == other));
    }

    #[test]
    fn wrap_degrees_stays_in_range() {
        assert_eq!(wrap_degrees(433.0), 73.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert_eq!(wrap_degrees(0.0), 0.0);
    }
}
