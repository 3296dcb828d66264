//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur while building or running circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// The backend cannot apply this gate.
    #[error("Unsupported gate: {0}")]
    UnsupportedGate(String),

    /// Circuit exceeds backend capabilities.
    #[error("Circuit exceeds backend capabilities: {0}")]
    CircuitTooLarge(String),

    /// Backend output failed validation or had the wrong shape.
    #[error("Invalid backend output: {0}")]
    State(#[from] qrogue_state::StateError),

    /// Gate or qubit arguments were invalid.
    #[error("Invalid gate: {0}")]
    Ir(#[from] qrogue_ir::IrError),

    /// Generic backend error.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
