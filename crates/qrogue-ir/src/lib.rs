//! Qrogue Gate and Circuit Model
//!
//! This crate describes what a player can put into a puzzle circuit:
//!
//! - **Catalog**: [`GateType`] lists the fixed set of gates with their names,
//!   aliases, arity and descriptions; [`GateKind`] is a concrete gate with
//!   its parameters.
//! - **Binding**: [`PlacedGate`] couples a gate kind with its qubit
//!   arguments and grid position, moving through
//!   [`GateState::Unbound`] → [`GateState::Bound`] → [`GateState::Placed`].
//! - **Fusion**: [`CombinationRules`] validates fusing several gates into
//!   one [`CombinedGate`], reporting each failure as its own
//!   [`CombineError`] variant.
//! - **Layout**: [`CircuitGrid`] arranges placed gates on a qubit × position
//!   table and keeps them left-aligned.
//!
//! # Example
//!
//! ```rust
//! use qrogue_ir::{CircuitGrid, GateKind, GateType, PlacedGate, QubitId};
//!
//! assert_eq!(GateType::from_name("Hadamard Gate").unwrap(), GateType::H);
//!
//! let mut cx = PlacedGate::new(GateKind::CX);
//! assert!(cx.use_qubit(QubitId(0)));
//! assert!(!cx.use_qubit(QubitId(1)));
//!
//! let mut grid = CircuitGrid::new(2, 3);
//! let id = grid.place(cx, 2).unwrap();
//! assert_eq!(grid.gate(id).unwrap().position(), Some(0));
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Aliases |
//! |------|--------|---------|
//! | `I` | 1 | Id, Identity |
//! | `X`, `Y`, `Z` | 1 | Pauli X/Y/Z |
//! | `H` | 1 | Hadamard |
//! | `S` | 1 | Phase |
//! | `RY`, `RZ` | 1 | Rotation Y/Z |
//! | `SWAP` | 2 | |
//! | `CX` | 2 | CNOT, Controlled X |
//! | `Combined` | n | Fused |

pub mod combined;
pub mod error;
pub mod gate;
pub mod grid;
pub mod placed;
pub mod qubit;

pub use combined::{CombinationRules, CombineError, CombinedGate, CombinedLayout};
pub use error::{IrError, IrResult};
pub use gate::{GateKind, GateType};
pub use grid::{CircuitGrid, GateId};
pub use placed::{GateState, PlacedGate};
pub use qubit::QubitId;
