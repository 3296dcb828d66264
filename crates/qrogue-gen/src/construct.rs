//! Shared pieces of the target-circuit strategies.

use std::iter;

use rand::Rng;
use rand::seq::SliceRandom;

use qrogue_hal::{CircuitRunner, SimulationBackend};
use qrogue_ir::{GateKind, PlacedGate, QubitId};
use qrogue_state::{AmplitudeVector, ComparisonConfig};

use crate::error::{GenError, GenResult};

/// Every ordered choice of `arity` distinct qubits from `qubits`.
pub fn ordered_assignments(qubits: &[QubitId], arity: usize) -> Vec<Vec<QubitId>> {
    fn extend(
        qubits: &[QubitId],
        arity: usize,
        prefix: &mut Vec<QubitId>,
        out: &mut Vec<Vec<QubitId>>,
    ) {
        if prefix.len() == arity {
            out.push(prefix.clone());
            return;
        }
        for q in qubits {
            if !prefix.contains(q) {
                prefix.push(*q);
                extend(qubits, arity, prefix, out);
                prefix.pop();
            }
        }
    }

    let mut out = Vec::new();
    if arity <= qubits.len() {
        extend(qubits, arity, &mut Vec::with_capacity(arity), &mut out);
    }
    out
}

/// Per-qubit usage counter. A qubit drops out once it carries `limit` gates.
#[derive(Debug, Clone)]
pub(crate) struct QubitBudget {
    uses: Vec<usize>,
    limit: usize,
}

impl QubitBudget {
    pub(crate) fn new(num_qubits: usize, limit: usize) -> Self {
        Self {
            uses: vec![0; num_qubits],
            limit,
        }
    }

    pub(crate) fn available(&self) -> Vec<QubitId> {
        self.uses
            .iter()
            .enumerate()
            .filter(|(_, used)| **used < self.limit)
            .map(|(q, _)| QubitId::from(q))
            .collect()
    }

    pub(crate) fn record(&mut self, qargs: &[QubitId]) {
        for q in qargs {
            self.uses[q.index()] += 1;
        }
    }

    /// Bound copies of `kind` on the available qubits, in shuffled order.
    pub(crate) fn candidates<R: Rng + ?Sized>(
        &self,
        kind: &GateKind,
        rng: &mut R,
    ) -> GenResult<Vec<PlacedGate>> {
        let mut assignments = ordered_assignments(&self.available(), kind.num_qubits() as usize);
        assignments.shuffle(rng);
        assignments
            .into_iter()
            .map(|qargs| PlacedGate::bound(kind.clone(), qargs).map_err(GenError::from))
            .collect()
    }
}

/// Everything a strategy needs besides randomness.
pub(crate) struct Construction<'a, 'b, B: SimulationBackend> {
    pub runner: &'a CircuitRunner<'b, B>,
    pub input_gates: &'a [PlacedGate],
    pub circuit_space: usize,
    pub comparison: ComparisonConfig,
}

impl<B: SimulationBackend> Construction<'_, '_, B> {
    /// State after the input gates, `circuit` and `candidate`.
    pub(crate) fn evaluate(
        &self,
        circuit: &[PlacedGate],
        candidate: &PlacedGate,
    ) -> GenResult<AmplitudeVector> {
        let gates = self
            .input_gates
            .iter()
            .chain(circuit)
            .chain(iter::once(candidate));
        Ok(self.runner.run_vector(gates)?)
    }

    pub(crate) fn num_qubits(&self) -> usize {
        self.runner.num_qubits()
    }
}

/// Result of one construction attempt.
#[derive(Debug, Clone)]
pub(crate) struct Attempt {
    /// Accepted gates in application order.
    pub gates: Vec<PlacedGate>,
    /// State after input and accepted gates.
    pub vector: AmplitudeVector,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_counts() {
        let qubits: Vec<QubitId> = (0u32..3).map(QubitId).collect();
        assert_eq!(ordered_assignments(&qubits, 1).len(), 3);
        assert_eq!(ordered_assignments(&qubits, 2).len(), 6);
        assert!(ordered_assignments(&qubits[..1], 2).is_empty());
    }

    #[test]
    fn test_budget_exhaustion() {
        let mut budget = QubitBudget::new(2, 2);
        budget.record(&[QubitId(0), QubitId(1)]);
        budget.record(&[QubitId(0)]);
        assert_eq!(budget.available(), vec![QubitId(1)]);
        let mut rng = rand::rngs::mock::StepRng::new(0, 1);
        assert!(budget.candidates(&GateKind::CX, &mut rng).unwrap().is_empty());
        assert_eq!(budget.candidates(&GateKind::H, &mut rng).unwrap().len(), 1);
    }
}
