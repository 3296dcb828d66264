//! Qrogue State Algebra
//!
//! Amplitude vectors and unitary circuit matrices used to describe the input
//! and target states of a circuit puzzle.
//!
//! Equality between states is tolerance based. The tolerance and the
//! "treat everything as equal" override travel together in a
//! [`ComparisonConfig`] that every comparison receives explicitly.
//!
//! # Example
//!
//! ```rust
//! use qrogue_state::{AmplitudeVector, CircuitMatrix, ComparisonConfig};
//!
//! let zero = AmplitudeVector::create_zero(2);
//! let same = CircuitMatrix::create_identity(2).multiply(&zero).unwrap();
//!
//! let cfg = ComparisonConfig::default();
//! assert!(zero.is_equal_to(&same, &cfg, true).unwrap());
//! ```

pub mod comparison;
pub mod error;
pub mod matrix;
pub mod vector;

pub use comparison::{ComparisonConfig, DEFAULT_TOLERANCE};
pub use error::{MatrixAxis, StateError, StateResult};
pub use matrix::CircuitMatrix;
pub use vector::AmplitudeVector;
