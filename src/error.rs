//! Error types for the simulation core.

use thiserror::Error;

use crate::sim::BodyId;

#[derive(Debug, Error)]
pub enum SimError {
    /// Rejected input (body parameters, configuration values, color names)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A tick produced non-finite mass, position or velocity for a body
    #[error("Simulation diverged for body {id}")]
    SimulationDivergence { id: BodyId },

    /// Degenerate geometry: two bodies at exactly the same position
    #[error("Undefined interaction between coincident bodies {a} and {b}")]
    Undefined { a: BodyId, b: BodyId },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
