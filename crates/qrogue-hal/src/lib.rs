//! Qrogue Simulation Abstraction
//!
//! The puzzle core treats quantum execution as a black box. This crate
//! defines that box and the helpers built on it:
//!
//! - [`SimulationBackend`]: build a circuit, append gates, run it as a
//!   statevector or a unitary
//! - [`AppendTo`]: append a bound [`PlacedGate`](qrogue_ir::PlacedGate),
//!   optionally inverted
//! - [`CircuitRunner`]: turn gate lists into validated
//!   [`AmplitudeVector`](qrogue_state::AmplitudeVector)s and
//!   [`CircuitMatrix`](qrogue_state::CircuitMatrix)es, rejecting malformed
//!   backend output with a typed error
//! - [`combine`]: fuse gates into a combined gate
//!
//! # Backends
//!
//! | Backend | Crate |
//! |---------|-------|
//! | Local statevector simulator | `qrogue-adapter-sim` |

pub mod backend;
pub mod combine;
pub mod error;
pub mod runner;

pub use backend::{AppendTo, SimulationBackend};
pub use combine::{Combination, combine};
pub use error::{HalError, HalResult};
pub use runner::{CircuitRunner, VALIDATION_TOLERANCE};
