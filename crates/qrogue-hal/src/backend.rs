//! Simulation backend trait.
//!
//! The puzzle core never simulates gates itself. It builds a circuit through
//! a [`SimulationBackend`], appends gates to it and asks for either the final
//! statevector or the unitary of the whole circuit.
//!
//! ```text
//!   build_circuit() ──→ append()* ──→ run_statevector() / run_unitary()
//! ```
//!
//! Backends take `&self` everywhere; circuit state lives in the associated
//! [`SimulationBackend::Circuit`] value owned by the caller.

use num_complex::Complex64;

use qrogue_ir::{GateKind, PlacedGate, QubitId};

use crate::error::HalResult;

/// A black-box simulator.
pub trait SimulationBackend {
    /// Circuit under construction.
    type Circuit;

    /// Backend name, for logging.
    fn name(&self) -> &str;

    /// Start an empty circuit over `num_qubits` qubits.
    fn build_circuit(&self, num_qubits: usize) -> HalResult<Self::Circuit>;

    /// Append `gate` on `qargs`, or its inverse if `inverse` is set.
    fn append(
        &self,
        circuit: &mut Self::Circuit,
        gate: &GateKind,
        inverse: bool,
        qargs: &[QubitId],
    ) -> HalResult<()>;

    /// Final amplitudes when the circuit runs on |0…0⟩.
    fn run_statevector(&self, circuit: &Self::Circuit) -> HalResult<Vec<Complex64>>;

    /// Unitary of the circuit as rows, optionally rounded to `decimals`.
    fn run_unitary(
        &self,
        circuit: &Self::Circuit,
        decimals: Option<u32>,
    ) -> HalResult<Vec<Vec<Complex64>>>;
}

/// Appending a bound gate to a backend circuit.
pub trait AppendTo {
    /// Append this gate (or its inverse) to `circuit`.
    fn append_to<B: SimulationBackend>(
        &self,
        backend: &B,
        circuit: &mut B::Circuit,
        inverse: bool,
    ) -> HalResult<()>;
}

impl AppendTo for PlacedGate {
    fn append_to<B: SimulationBackend>(
        &self,
        backend: &B,
        circuit: &mut B::Circuit,
        inverse: bool,
    ) -> HalResult<()> {
        if !self.qargs_complete() {
            return Err(qrogue_ir::IrError::UnboundGate(self.name().to_string()).into());
        }
        backend.append(circuit, self.kind(), inverse, self.qargs())
    }
}
