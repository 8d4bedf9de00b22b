//! Wandering robots: turn on every collision, explode when they die

use crate::core::geometry::Vec2;
use crate::core::random::unit_f32;
use crate::domain::entity::Attributes;

use super::ordnance::{Explosion, Mine};
use super::{wrap_degrees, Behavior, Message, RemovalReason, UnitContext};

const ROBOT_SIZE: f32 = 32.0;
/// Heading change after bumping into something
const BOUNCE_TURN: f32 = 73.0;
const MINE_INTERVAL_MS: f64 = 1000.0;
/// Sweep amplitude of the mine dropper heading, degrees
const SWEEP_LIMIT: f32 = 15.0;

fn robot_attributes(name: &str, location: Vec2, angle: f32, velocity: f32, hitpoints: i32) -> Attributes {
    let v = Vec2::from_angle_deg(angle) * velocity;
    Attributes::new(name)
        .at(location.x, location.y)
        .sized(ROBOT_SIZE, ROBOT_SIZE)
        .with_angle(angle)
        .with_velocity(v.x, v.y)
        .with_hitpoints(hitpoints)
        .floating()
}

/// Drifts with a slowly creeping heading
pub struct BasicRobot {
    location: Vec2,
    angle: f32,
    velocity: f32,
    hitpoints: i32,
    rng: u32,
}

impl BasicRobot {
    pub fn new(location: Vec2, angle: f32, velocity: f32, hitpoints: i32) -> Self {
        Self { location, angle, velocity, hitpoints, rng: 0x2545_F491 }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.rng = seed;
        self
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }
}

impl Default for BasicRobot {
    fn default() -> Self {
        Self::new(Vec2::zero(), 135.0, 1.0, 20)
    }
}

impl Behavior for BasicRobot {
    fn join(&mut self) -> Attributes {
        robot_attributes("BasicRobot", self.location, self.angle, self.velocity, self.hitpoints)
    }

    fn on_message(&mut self, msg: &Message, ctx: &mut UnitContext<'_>) {
        match msg {
            Message::WorldState(state) => {
                if let Some(me) = state.actor(ctx.me()) {
                    self.location = me.location;
                }
                self.angle = wrap_degrees(self.angle + (unit_f32(&mut self.rng) * 1.5).trunc());
                ctx.update_vector(self.angle, self.velocity);
            }
            Message::Collision { .. } => {
                ctx.damage(ctx.me(), 1);
                self.angle = wrap_degrees(self.angle + BOUNCE_TURN);
            }
            Message::Removed(RemovalReason::Died) => {
                ctx.spawn(Explosion::new(self.location, self.angle));
            }
            Message::Damage(_) | Message::Removed(_) => {}
        }
    }
}

/// Sweeps its heading back and forth and drops a mine every second
pub struct MineDropper {
    location: Vec2,
    angle: f32,
    delta: f32,
    sweeping_up: bool,
    next_mine: f64,
    velocity: f32,
    hitpoints: i32,
}

impl MineDropper {
    pub fn new(location: Vec2, angle: f32, velocity: f32, hitpoints: i32) -> Self {
        Self { location, angle, delta: 0.0, sweeping_up: true, next_mine: 0.0, velocity, hitpoints }
    }

    /// Where the next mine goes: behind the robot along its heading
    fn mine_location(&self) -> Vec2 {
        let distance = (ROBOT_SIZE + ROBOT_SIZE) / 3.0;
        let (sin, cos) = (self.angle + self.delta).to_radians().sin_cos();
        let half = ROBOT_SIZE / 2.0;
        Vec2::new(
            self.location.x + half - sin * distance,
            self.location.y + half + cos * distance,
        )
    }

    fn sweep(&mut self, step: f32) {
        if self.sweeping_up {
            self.delta += step;
            if self.delta > SWEEP_LIMIT {
                self.delta = SWEEP_LIMIT;
                self.sweeping_up = false;
            }
        } else {
            self.delta -= step;
            if self.delta < -SWEEP_LIMIT {
                self.delta = -SWEEP_LIMIT;
                self.sweeping_up = true;
            }
        }
    }
}

impl Default for MineDropper {
    fn default() -> Self {
        Self::new(Vec2::zero(), 135.0, 1.0, 20)
    }
}

impl Behavior for MineDropper {
    fn join(&mut self) -> Attributes {
        robot_attributes("MineDropper", self.location, self.angle, self.velocity, self.hitpoints)
    }

    fn on_message(&mut self, msg: &Message, ctx: &mut UnitContext<'_>) {
        match msg {
            Message::WorldState(state) => {
                if let Some(me) = state.actor(ctx.me()) {
                    self.location = me.location;
                }
                self.sweep(state.frame_duration as f32);
                if self.next_mine <= state.time {
                    self.next_mine = state.time + MINE_INTERVAL_MS;
                    ctx.spawn(Mine::new(self.mine_location()));
                }
                ctx.update_vector(self.angle + self.delta, self.velocity);
            }
            Message::Collision { .. } => {
                self.angle = wrap_degrees(self.angle + BOUNCE_TURN);
                ctx.damage(ctx.me(), 1);
            }
            Message::Removed(RemovalReason::Died) => {
                ctx.spawn(Explosion::new(self.location, self.angle));
            }
            Message::Damage(_) | Message::Removed(_) => {}
        }
    }
}
