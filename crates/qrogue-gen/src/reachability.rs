//! Reachability search.
//!
//! Looks for a circuit built from a gate multiset that maps an input state
//! onto a target state. The search is a depth-first walk over an explicit
//! stack of immutable frames; each frame owns the gates still unused and
//! the circuit built so far, so backtracking is just popping the stack.
//!
//! The search is a witness finder, not a decision procedure: with
//! [`SearchOrder::GivenOrder`] only one gate order is explored, and
//! any order restriction can miss solutions that another order would find.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use qrogue_hal::{CircuitRunner, SimulationBackend};
use qrogue_ir::{GateKind, PlacedGate, QubitId};
use qrogue_state::{AmplitudeVector, ComparisonConfig};

use crate::construct::ordered_assignments;
use crate::error::{GenError, GenResult};

/// Which gate orders the search explores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOrder {
    /// Any gate may come next.
    #[default]
    AnyOrder,
    /// Gates are used in the order they were given.
    GivenOrder,
}

/// A circuit that reaches the target.
#[derive(Debug, Clone)]
pub struct Witness {
    /// Gates in application order. May use only part of the multiset.
    pub gates: Vec<PlacedGate>,
    /// State the gates produce from the input.
    pub vector: AmplitudeVector,
}

#[derive(Debug)]
struct Frame {
    remaining: Vec<GateKind>,
    circuit: Vec<PlacedGate>,
}

/// Depth-first witness search over gate orders and qubit assignments.
pub struct ReachabilitySearch<'b, B: SimulationBackend> {
    runner: CircuitRunner<'b, B>,
    comparison: ComparisonConfig,
    order: SearchOrder,
    max_nodes: Option<usize>,
}

impl<'b, B: SimulationBackend> ReachabilitySearch<'b, B> {
    /// Search `num_qubits`-qubit circuits on `backend`.
    pub fn new(backend: &'b B, num_qubits: usize) -> Self {
        Self {
            runner: CircuitRunner::new(backend, num_qubits),
            comparison: ComparisonConfig::default(),
            order: SearchOrder::default(),
            max_nodes: None,
        }
    }

    /// Use `comparison` to match the target. The override flag is ignored.
    #[must_use]
    pub fn with_comparison(mut self, comparison: ComparisonConfig) -> Self {
        self.comparison = comparison;
        self
    }

    /// Restrict gate orders.
    #[must_use]
    pub fn with_order(mut self, order: SearchOrder) -> Self {
        self.order = order;
        self
    }

    /// Give up after evaluating `max_nodes` circuits.
    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Find a circuit over `gates` that maps `input` onto `target`.
    ///
    /// The empty circuit is checked first. Returns `Ok(None)` once every
    /// explored circuit failed, and
    /// [`GenError::SearchBudgetExhausted`] if the node budget ran out.
    #[instrument(level = "debug", skip_all, fields(gates = gates.len(), order = ?self.order))]
    pub fn find(
        &self,
        input: &AmplitudeVector,
        target: &AmplitudeVector,
        gates: &[GateKind],
    ) -> GenResult<Option<Witness>> {
        let qubits: Vec<QubitId> = (0..self.runner.num_qubits()).map(QubitId::from).collect();
        let mut stack = vec![Frame {
            remaining: gates.to_vec(),
            circuit: Vec::new(),
        }];
        let mut visited = 0;

        while let Some(frame) = stack.pop() {
            if self.max_nodes.is_some_and(|max| visited >= max) {
                return Err(GenError::SearchBudgetExhausted { visited });
            }
            visited += 1;

            let vector = self
                .runner
                .run_matrix(&frame.circuit, None)?
                .multiply(input)?;
            if vector.is_equal_to(target, &self.comparison, true)? {
                debug!(visited, length = frame.circuit.len(), "found witness");
                return Ok(Some(Witness {
                    gates: frame.circuit,
                    vector,
                }));
            }

            // pushed in reverse so the first choice is explored first
            for (index, kind) in self.choices(&frame.remaining).into_iter().rev() {
                let mut remaining = frame.remaining.clone();
                remaining.remove(index);
                for qargs in ordered_assignments(&qubits, kind.num_qubits() as usize)
                    .into_iter()
                    .rev()
                {
                    let mut circuit = frame.circuit.clone();
                    circuit.push(PlacedGate::bound(kind.clone(), qargs)?);
                    stack.push(Frame {
                        remaining: remaining.clone(),
                        circuit,
                    });
                }
            }
        }

        debug!(visited, "no witness");
        Ok(None)
    }

    /// Gates that may come next: the first of each distinct kind, or only
    /// the head of the list in given order.
    fn choices<'g>(&self, remaining: &'g [GateKind]) -> Vec<(usize, &'g GateKind)> {
        match self.order {
            SearchOrder::GivenOrder => remaining.first().map(|k| (0, k)).into_iter().collect(),
            SearchOrder::AnyOrder => {
                let mut choices: Vec<(usize, &GateKind)> = Vec::new();
                for (i, kind) in remaining.iter().enumerate() {
                    if !choices.iter().any(|(_, k)| *k == kind) {
                        choices.push((i, kind));
                    }
                }
                choices
            }
        }
    }
}
