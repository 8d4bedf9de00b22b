use thiserror::Error;

use crate::domain::entity::EntityHandle;

/// Failures that stop a tick or reject a request.
///
/// Convergence exhaustion, malformed hitboxes and unroutable intents are not
/// errors; they are logged and the simulation keeps going.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("entity registry is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    #[error("unknown entity {0:?}")]
    UnknownEntity(EntityHandle),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
