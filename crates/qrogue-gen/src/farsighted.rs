//! Farsighted construction.
//!
//! One running circuit. A candidate is rejected only if it produces the
//! zero state or directly undoes the latest gate on one of its qubits, so
//! more of the selected gates end up placed than with the nearsighted
//! strategy.

use rand::Rng;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use qrogue_hal::SimulationBackend;
use qrogue_ir::{CircuitGrid, GateKind, IrError, PlacedGate, QubitId};
use qrogue_state::AmplitudeVector;

use crate::construct::{Attempt, Construction, QubitBudget};
use crate::error::GenResult;

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
    let mut budget = QubitBudget::new(num_qubits, ctx.circuit_space);
    let mut grid = CircuitGrid::new(num_qubits, ctx.circuit_space);
    let mut circuit: Vec<PlacedGate> = Vec::with_capacity(selected.len());
    let mut vector = input.clone();
    // index into `circuit` of the latest gate on each qubit
    let mut latest: FxHashMap<QubitId, usize> = FxHashMap::default();

    for kind in selected {
        let mut accepted = None;
        for candidate in budget.candidates(kind, rng)? {
            let undoes_latest = candidate
                .qargs()
                .iter()
                .filter_map(|q| latest.get(q))
                .any(|&i| candidate.cancels(&circuit[i]));
            if undoes_latest {
                continue;
            }
            let id = match grid.place(candidate.clone(), ctx.circuit_space - 1) {
                Ok(id) => id,
                Err(IrError::GridFull(_)) => continue,
                Err(e) => return Err(e.into()),
            };
            let next = ctx.evaluate(&circuit, &candidate)?;
            if next.is_zero() {
                grid.remove(id)?;
                continue;
            }
            accepted = Some((candidate, next));
            break;
        }

        match accepted {
            Some((gate, next)) => {
                trace!(gate = %kind, qargs = ?gate.qargs(), "accepted");
                for q in gate.qargs() {
                    latest.insert(*q, circuit.len());
                }
                budget.record(gate.qargs());
                circuit.push(gate);
                vector = next;
            }
            None => trace!(gate = %kind, "skipped"),
        }
    }

    debug!(
        placed = circuit.len(),
        requested = selected.len(),
        "farsighted attempt finished"
    );
    Ok(Attempt {
        gates: circuit,
        vector,
    })
}
