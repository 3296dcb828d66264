//! Building combined gates.

use tracing::debug;

use qrogue_ir::{
    CombinationRules, CombinedGate, CombinedLayout, GateKind, IrError, PlacedGate,
};

use crate::backend::SimulationBackend;
use crate::error::HalResult;
use crate::runner::CircuitRunner;

/// A freshly fused gate and what it cost.
#[derive(Debug, Clone)]
pub struct Combination {
    /// The combined gate, bound to the global qubits of its sub-gates.
    pub gate: PlacedGate,
    /// Fuse credits spent.
    pub cost: usize,
}

/// Fuse `sub_gates` into one gate.
///
/// The sub-gates are validated against `rules` and `fuse_credits`, moved
/// onto local qubits, and executed once to obtain the fused unitary.
pub fn combine<B: SimulationBackend>(
    backend: &B,
    label: impl Into<String>,
    sub_gates: &[PlacedGate],
    fuse_credits: usize,
    rules: &CombinationRules,
) -> HalResult<Combination> {
    let cost = rules.validate(sub_gates, fuse_credits).map_err(IrError::from)?;
    let layout = CombinedLayout::of(sub_gates);
    let num_qubits = layout.qubits.len();

    let matrix = CircuitRunner::new(backend, num_qubits).run_matrix(&layout.local_gates, None)?;
    let flat = matrix.as_array().iter().copied().collect();

    let label = label.into();
    debug!(
        label = %label,
        sub_gates = sub_gates.len(),
        num_qubits,
        cost,
        "combined gates"
    );
    let combined = CombinedGate::new(label, num_qubits as u32, layout.local_gates, flat);
    let gate = PlacedGate::bound(GateKind::Combined(combined), layout.qubits)?;
    Ok(Combination { gate, cost })
}
