//! Nearsighted construction.
//!
//! Every accepted gate becomes a node in an arena of immutable snapshots
//! (state, qubit budget, solution grid) linked to its parent. A candidate is
//! accepted only if its state differs from every state recorded in the
//! arena, so the target circuit never passes through the same state twice.

use rand::Rng;
use tracing::{debug, trace};

use qrogue_hal::SimulationBackend;
use qrogue_ir::{CircuitGrid, GateKind, IrError, PlacedGate};
use qrogue_state::{AmplitudeVector, ComparisonConfig};

use crate::construct::{Attempt, Construction, QubitBudget};
use crate::error::GenResult;

#[derive(Debug)]
struct Node {
    parent: Option<usize>,
    gate: Option<PlacedGate>,
    vector: AmplitudeVector,
    budget: QubitBudget,
    grid: CircuitGrid,
}

/// Grow a target circuit from `selected`, skipping gates that can only
/// revisit known states.
///
/// Sweeps over the pending gates until all are placed or a full sweep
/// places none.
pub(crate) fn build<B, R>(
    ctx: &Construction<'_, '_, B>,
    rng: &mut R,
    selected: &[GateKind],
    input: &AmplitudeVector,
) -> GenResult<Attempt>
where
    B: SimulationBackend,
    R: Rng + ?Sized,
{
    let num_qubits = ctx.num_qubits();
    let mut arena = vec![Node {
        parent: None,
        gate: None,
        vector: input.clone(),
        budget: QubitBudget::new(num_qubits, ctx.circuit_space),
        grid: CircuitGrid::new(num_qubits, ctx.circuit_space),
    }];
    let mut current = 0;
    let mut pending: Vec<&GateKind> = selected.iter().collect();

    loop {
        let before = pending.len();
        let mut i = 0;
        while i < pending.len() {
            match extend(ctx, rng, &arena, current, pending[i])? {
                Some(node) => {
                    trace!(gate = %pending[i], depth = arena.len(), "accepted");
                    arena.push(node);
                    current = arena.len() - 1;
                    pending.remove(i);
                }
                None => {
                    trace!(gate = %pending[i], "skipped for this sweep");
                    i += 1;
                }
            }
        }
        if pending.is_empty() || pending.len() == before {
            break;
        }
    }

    let gates = path(&arena, current);
    debug!(
        placed = gates.len(),
        requested = selected.len(),
        "nearsighted attempt finished"
    );
    Ok(Attempt {
        gates,
        vector: arena[current].vector.clone(),
    })
}

/// Try every assignment of `kind` below `current`.
fn extend<B, R>(
    ctx: &Construction<'_, '_, B>,
    rng: &mut R,
    arena: &[Node],
    current: usize,
    kind: &GateKind,
) -> GenResult<Option<Node>>
where
    B: SimulationBackend,
    R: Rng + ?Sized,
{
    let node = &arena[current];
    let circuit = path(arena, current);
    for candidate in node.budget.candidates(kind, rng)? {
        let mut grid = node.grid.clone();
        match grid.place(candidate.clone(), ctx.circuit_space - 1) {
            Ok(_) => {}
            Err(IrError::GridFull(_)) => continue,
            Err(e) => return Err(e.into()),
        }
        let vector = ctx.evaluate(&circuit, &candidate)?;
        if seen(arena, &vector, &ctx.comparison)? {
            continue;
        }
        let mut budget = node.budget.clone();
        budget.record(candidate.qargs());
        return Ok(Some(Node {
            parent: Some(current),
            gate: Some(candidate),
            vector,
            budget,
            grid,
        }));
    }
    Ok(None)
}

fn seen(arena: &[Node], vector: &AmplitudeVector, comparison: &ComparisonConfig) -> GenResult<bool> {
    for node in arena {
        if vector.is_equal_to(&node.vector, comparison, true)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Gates from the root down to `node`.
fn path(arena: &[Node], mut node: usize) -> Vec<PlacedGate> {
    let mut gates = Vec::new();
    while let Some(gate) = &arena[node].gate {
        gates.push(gate.clone());
        match arena[node].parent {
            Some(parent) => node = parent,
            None => break,
        }
    }
    gates.reverse();
    gates
}
