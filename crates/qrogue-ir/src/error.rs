//! Error types for the IR crate.

use crate::combined::CombineError;
use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in gate and grid operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// No catalog gate matches the name.
    #[error("Unknown gate '{0}'")]
    UnknownGate(String),

    /// A rotation gate was named without its angle.
    #[error("Gate '{0}' requires an angle, e.g. '{0}(1.57)'")]
    MissingParameter(String),

    /// A gate parameter could not be parsed.
    #[error("Invalid parameter '{value}' for gate '{gate_name}'")]
    InvalidParameter {
        /// Name of the gate.
        gate_name: String,
        /// The text that failed to parse.
        value: String,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Duplicate qubit in a gate's arguments.
    #[error("Duplicate qubit {qubit} for gate '{gate_name}'")]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Name of the gate.
        gate_name: String,
    },

    /// Qubit index beyond the circuit.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit circuit")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of qubit rows.
        num_qubits: usize,
    },

    /// Column index beyond the circuit space.
    #[error("Position {position} out of range for circuit space {circuit_space}")]
    PositionOutOfRange {
        /// Requested column.
        position: usize,
        /// Number of columns.
        circuit_space: usize,
    },

    /// Gate does not have all of its qubits assigned yet.
    #[error("Gate '{0}' is not bound to qubits")]
    UnboundGate(String),

    /// Placing the gate would push another gate off the grid.
    #[error("No room to place gate '{0}'")]
    GridFull(String),

    /// Gate is not (consistently) present in the grid.
    #[error("Gate not found in circuit grid")]
    GateNotFound,

    /// Combining gates failed validation.
    #[error(transparent)]
    Combine(#[from] CombineError),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
