//! Error types for the state crate.

use thiserror::Error;

/// Which axis of a matrix failed a unitarity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixAxis {
    /// A row sum was off.
    Row,
    /// A column sum was off.
    Column,
}

impl std::fmt::Display for MatrixAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixAxis::Row => write!(f, "row"),
            MatrixAxis::Column => write!(f, "column"),
        }
    }
}

/// Errors that can occur in state-algebra operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StateError {
    /// Amplitude count is not a power of two.
    #[error("Amplitude vector length {0} is not a power of two")]
    InvalidLength(usize),

    /// Matrix is not square or its size is not a power of two.
    #[error("Matrix of {rows}x{cols} is not a square power-of-two matrix")]
    InvalidShape {
        /// Number of rows.
        rows: usize,
        /// Length of the offending row.
        cols: usize,
    },

    /// The other operand is shorter than this vector.
    #[error("Vector of length {this} cannot be compared against shorter vector of length {other}")]
    LengthMismatch {
        /// Length of the receiver.
        this: usize,
        /// Length of the argument.
        other: usize,
    },

    /// Matrix and vector act on different numbers of qubits.
    #[error("Dimension mismatch: matrix acts on {matrix} qubits, vector has {vector}")]
    DimensionMismatch {
        /// Qubits of the matrix.
        matrix: usize,
        /// Qubits of the vector.
        vector: usize,
    },

    /// Probabilities do not sum to one.
    #[error("Amplitudes are not normalised: probabilities sum to {0}")]
    NotNormalized(f64),

    /// A row or column of a matrix does not have unit norm.
    #[error("Matrix is not unitary: {axis} {index} has squared norm {sum}")]
    NotUnitary {
        /// Offending axis.
        axis: MatrixAxis,
        /// Index of the row or column.
        index: usize,
        /// Squared-magnitude sum found.
        sum: f64,
    },
}

/// Result type for state operations.
pub type StateResult<T> = Result<T, StateError>;
