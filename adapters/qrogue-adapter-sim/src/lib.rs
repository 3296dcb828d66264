//! Qrogue Local Statevector Simulator
//!
//! An exact, dependency-light implementation of
//! [`SimulationBackend`](qrogue_hal::SimulationBackend) for puzzle-sized
//! circuits. It keeps the appended gates and replays them on a statevector
//! whenever a result is requested.
//!
//! # Performance
//!
//! | Qubits | Statevector | Unitary |
//! |--------|-------------|---------|
//! | 2-5 | Instant | Instant |
//! | 8 | Instant | Fast |
//! | 12 | Fast | Slow |
//!
//! # Example
//!
//! ```rust
//! use qrogue_adapter_sim::StatevectorBackend;
//! use qrogue_hal::SimulationBackend;
//! use qrogue_ir::{GateKind, QubitId};
//!
//! let backend = StatevectorBackend::new();
//! let mut circuit = backend.build_circuit(2).unwrap();
//! backend.append(&mut circuit, &GateKind::H, false, &[QubitId(0)]).unwrap();
//! backend.append(&mut circuit, &GateKind::CX, false, &[QubitId(0), QubitId(1)]).unwrap();
//!
//! let amplitudes = backend.run_statevector(&circuit).unwrap();
//! assert!((amplitudes[3].re - 0.5_f64.sqrt()).abs() < 1e-12);
//! ```

mod simulator;
mod statevector;

pub use simulator::{SimCircuit, StatevectorBackend};
