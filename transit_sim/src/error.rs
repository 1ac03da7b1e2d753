//! Error types for the simulation harness.

use thiserror::Error;
use transit_core::TransitError;

/// Errors raised while building or running a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// A movement or record contract was violated inside the model
    #[error("Transit error: {0}")]
    Transit(#[from] TransitError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),
}
