//! Turning gate lists into validated vectors and matrices.

use tracing::trace;

use qrogue_ir::PlacedGate;
use qrogue_state::{AmplitudeVector, CircuitMatrix};

use crate::backend::{AppendTo, SimulationBackend};
use crate::error::HalResult;

/// Tolerance used to validate backend output (normalisation, unitarity).
pub const VALIDATION_TOLERANCE: f64 = 1e-6;

/// Runs gate lists on a backend for a fixed qubit count.
///
/// Every run builds a fresh circuit, so one runner can be shared by any
/// number of independent evaluations.
pub struct CircuitRunner<'b, B: SimulationBackend> {
    backend: &'b B,
    num_qubits: usize,
    tolerance: f64,
}

impl<'b, B: SimulationBackend> CircuitRunner<'b, B> {
    /// Create a runner for `num_qubits`-qubit circuits.
    pub fn new(backend: &'b B, num_qubits: usize) -> Self {
        Self {
            backend,
            num_qubits,
            tolerance: VALIDATION_TOLERANCE,
        }
    }

    /// Override the output validation tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &'b B {
        self.backend
    }

    /// Qubit count of every circuit this runner builds.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Statevector after applying `gates` to |0…0⟩.
    pub fn run_vector<'g>(
        &self,
        gates: impl IntoIterator<Item = &'g PlacedGate>,
    ) -> HalResult<AmplitudeVector> {
        self.run_vector_steps(gates.into_iter().map(|g| (g, false)))
    }

    /// Statevector after applying each `(gate, inverse)` step to |0…0⟩.
    pub fn run_vector_steps<'g>(
        &self,
        steps: impl IntoIterator<Item = (&'g PlacedGate, bool)>,
    ) -> HalResult<AmplitudeVector> {
        let (circuit, count) = self.build(steps)?;
        let amplitudes = self.backend.run_statevector(&circuit)?;
        trace!(
            backend = self.backend.name(),
            gates = count,
            "ran statevector"
        );
        Ok(AmplitudeVector::from_backend(
            amplitudes,
            count,
            self.tolerance,
        )?)
    }

    /// Unitary of `gates`, optionally rounded to `decimals`.
    pub fn run_matrix<'g>(
        &self,
        gates: impl IntoIterator<Item = &'g PlacedGate>,
        decimals: Option<u32>,
    ) -> HalResult<CircuitMatrix> {
        let (circuit, count) = self.build(gates.into_iter().map(|g| (g, false)))?;
        let rows = self.backend.run_unitary(&circuit, decimals)?;
        trace!(backend = self.backend.name(), gates = count, "ran unitary");
        // rounding can move row norms by up to ~dim * 10^-decimals
        let tolerance = match decimals {
            Some(d) => self.tolerance.max((rows.len() as f64) * 10f64.powi(-(d as i32))),
            None => self.tolerance,
        };
        Ok(CircuitMatrix::from_backend(rows, count, tolerance)?)
    }

    fn build<'g>(
        &self,
        steps: impl IntoIterator<Item = (&'g PlacedGate, bool)>,
    ) -> HalResult<(B::Circuit, usize)> {
        let mut circuit = self.backend.build_circuit(self.num_qubits)?;
        let mut count = 0;
        for (gate, inverse) in steps {
            gate.append_to(self.backend, &mut circuit, inverse)?;
            count += 1;
        }
        Ok((circuit, count))
    }
}
