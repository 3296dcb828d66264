//! Property-based tests for circuit grid layout.
//!
//! Random sequences of place/remove operations must keep every gate
//! left-aligned and every multi-qubit gate in a single shared column.

use proptest::prelude::*;
use qrogue_ir::{CircuitGrid, GateId, GateKind, IrError, PlacedGate, QubitId};

const NUM_QUBITS: u32 = 3;
const SPACE: usize = 5;

#[derive(Debug, Clone)]
enum GridOp {
    Single(u32, usize),
    Double(u32, u32, usize),
    Remove(usize),
}

fn arb_op(allow_double: bool) -> BoxedStrategy<GridOp> {
    let single = (0..NUM_QUBITS, 0..SPACE).prop_map(|(q, p)| GridOp::Single(q, p));
    let remove = (0_usize..16).prop_map(GridOp::Remove);
    if allow_double {
        let double = (0..NUM_QUBITS, 1..NUM_QUBITS, 0..SPACE)
            .prop_map(|(a, off, p)| GridOp::Double(a, (a + off) % NUM_QUBITS, p));
        prop_oneof![single, double, remove].boxed()
    } else {
        prop_oneof![single, remove].boxed()
    }
}

/// Apply `ops`, returning the grid and the ids that are still placed.
fn run(ops: Vec<GridOp>) -> (CircuitGrid, Vec<GateId>) {
    let mut grid = CircuitGrid::new(NUM_QUBITS as usize, SPACE);
    let mut live: Vec<GateId> = Vec::new();
    for op in ops {
        let placed = match op {
            GridOp::Single(q, p) => {
                grid.place(PlacedGate::bound(GateKind::X, [QubitId(q)]).unwrap(), p)
            }
            GridOp::Double(a, b, p) => grid.place(
                PlacedGate::bound(GateKind::CX, [QubitId(a), QubitId(b)]).unwrap(),
                p,
            ),
            GridOp::Remove(i) => {
                if !live.is_empty() {
                    let id = live.remove(i % live.len());
                    grid.remove(id).unwrap();
                }
                continue;
            }
        };
        match placed {
            Ok(id) => live.push(id),
            Err(IrError::GridFull(_)) => {}
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    (grid, live)
}

proptest! {
    #[test]
    fn single_qubit_rows_have_no_gaps(ops in prop::collection::vec(arb_op(false), 0..30)) {
        let (grid, live) = run(ops);
        prop_assert_eq!(grid.len(), live.len());
        for q in 0..NUM_QUBITS {
            let row: Vec<bool> = (0..SPACE).map(|p| grid.get(QubitId(q), p).is_some()).collect();
            if let Some(last) = row.iter().rposition(|&o| o) {
                prop_assert!(row[..=last].iter().all(|&o| o), "gap in row {}: {:?}", q, row);
            }
        }
    }

    #[test]
    fn mixed_gates_stay_left_aligned(ops in prop::collection::vec(arb_op(true), 0..30)) {
        let (grid, live) = run(ops);
        prop_assert!(grid.is_left_aligned());
        prop_assert_eq!(grid.iter().count(), live.len());
        for id in live {
            let gate = grid.gate(id).unwrap();
            let col = gate.position().unwrap();
            for q in gate.qargs() {
                prop_assert_eq!(grid.get(*q, col), Some(id));
            }
        }
    }
}
