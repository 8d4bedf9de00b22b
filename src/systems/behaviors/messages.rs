use std::fmt;
use std::sync::Arc;

use crate::domain::entity::EntityHandle;
use crate::domain::world_state::WorldState;
use crate::systems::collision::Collider;

use super::Behavior;

/// Why an entity left the world
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovalReason {
    /// Hitpoints reached zero (damage, KILLME, or a panicking unit)
    Died,
    /// Location left the playable bounds
    OutOfBounds,
}

/// Coordinator -> unit
#[derive(Clone, Debug)]
pub enum Message {
    /// Fully resolved state of the previous tick
    WorldState(Arc<WorldState>),
    Collision { me: EntityHandle, other: Collider },
    Damage(i32),
    Removed(RemovalReason),
}

/// Unit -> coordinator, applied after every unit has run
pub enum Intent {
    UpdateVector { angle: f32, velocity: f32 },
    KillMe,
    Damage { target: EntityHandle, amount: i32 },
    Spawn(Box<dyn Behavior>),
    Quit(i32),
}

impl fmt::Debug for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpdateVector { angle, velocity } => f
                .debug_struct("UpdateVector")
                .field("angle", angle)
                .field("velocity", velocity)
                .finish(),
            Self::KillMe => f.write_str("KillMe"),
            Self::Damage { target, amount } => {
                f.debug_struct("Damage").field("target", target).field("amount", amount).finish()
            }
            Self::Spawn(_) => f.write_str("Spawn(..)"),
            Self::Quit(code) => f.debug_tuple("Quit").field(code).finish(),
        }
    }
}
