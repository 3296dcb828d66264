//! Error types for puzzle generation.

use thiserror::Error;

/// Errors produced while configuring or running the generator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenError {
    /// The gate pool contains no gates.
    #[error("Gate pool is empty")]
    EmptyGatePool,

    /// A pool gate needs more qubits than the puzzle has.
    #[error("Gate '{gate}' acts on {arity} qubits but the puzzle only has {num_qubits}")]
    ArityMismatch {
        /// Offending gate name.
        gate: String,
        /// Qubits the gate needs.
        arity: u32,
        /// Qubits available.
        num_qubits: usize,
    },

    /// Invalid generator or difficulty settings.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Backend failure.
    #[error("Simulation error: {0}")]
    Hal(#[from] qrogue_hal::HalError),

    /// State algebra failure.
    #[error("State error: {0}")]
    State(#[from] qrogue_state::StateError),

    /// Gate or grid failure.
    #[error("Gate error: {0}")]
    Ir(#[from] qrogue_ir::IrError),

    /// The reachability search hit its node budget without an answer.
    #[error("Reachability search gave up after visiting {visited} circuits")]
    SearchBudgetExhausted {
        /// Circuits evaluated before giving up.
        visited: usize,
    },
}

/// Result type for generation.
pub type GenResult<T> = Result<T, GenError>;
