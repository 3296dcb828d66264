//! Two-dimensional circuit layout.
//!
//! A [`CircuitGrid`] has one row per qubit and `circuit_space` columns.
//! Gates are kept left-aligned: after every mutation no gate could move one
//! column to the left. A multi-qubit gate occupies the same column on all of
//! its rows, so a row may show a gap directly before such a gate when the
//! gate is held back by one of its other rows.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::placed::PlacedGate;
use crate::qubit::QubitId;

/// Handle of a gate stored in a [`CircuitGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GateId(pub usize);

/// Qubit × position table of placed gates.
#[derive(Debug, Clone)]
pub struct CircuitGrid {
    num_qubits: usize,
    circuit_space: usize,
    cells: Vec<Vec<Option<GateId>>>,
    gates: Vec<Option<PlacedGate>>,
}

impl CircuitGrid {
    /// An empty grid.
    pub fn new(num_qubits: usize, circuit_space: usize) -> Self {
        Self {
            num_qubits,
            circuit_space,
            cells: vec![vec![None; circuit_space]; num_qubits],
            gates: Vec::new(),
        }
    }

    /// Number of qubit rows.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of columns.
    pub fn circuit_space(&self) -> usize {
        self.circuit_space
    }

    /// Number of gates in the grid.
    pub fn len(&self) -> usize {
        self.gates.iter().filter(|g| g.is_some()).count()
    }

    /// Whether the grid holds no gates.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gate id at a cell.
    pub fn get(&self, qubit: QubitId, position: usize) -> Option<GateId> {
        self.cells
            .get(qubit.index())
            .and_then(|row| row.get(position))
            .copied()
            .flatten()
    }

    /// Gate stored under `id`.
    pub fn gate(&self, id: GateId) -> Option<&PlacedGate> {
        self.gates.get(id.0).and_then(Option::as_ref)
    }

    /// Remove every gate.
    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.iter_mut().for_each(|c| *c = None);
        }
        self.gates.clear();
    }

    /// Place a bound gate as close to `target_position` as left alignment
    /// allows.
    ///
    /// On every row of the gate the scan moves left from `target_position`
    /// over free cells; the gate lands in the right-most of these per-row
    /// results so that all rows share one column. If that column is taken,
    /// the occupants and everything to their right shift one column right.
    /// Fails without modifying the grid if the shift would push a gate off
    /// the grid.
    pub fn place(&mut self, mut gate: PlacedGate, target_position: usize) -> IrResult<GateId> {
        if !gate.qargs_complete() {
            return Err(IrError::UnboundGate(gate.name().to_string()));
        }
        if target_position >= self.circuit_space {
            return Err(IrError::PositionOutOfRange {
                position: target_position,
                circuit_space: self.circuit_space,
            });
        }
        if let Some(q) = gate.qargs().iter().find(|q| q.index() >= self.num_qubits) {
            return Err(IrError::QubitOutOfRange {
                qubit: *q,
                num_qubits: self.num_qubits,
            });
        }

        let rows: Vec<usize> = gate.qargs().iter().map(|q| q.index()).collect();
        let column = rows
            .iter()
            .map(|&r| {
                let mut col = target_position;
                while col > 0 && self.cells[r][col - 1].is_none() {
                    col -= 1;
                }
                col
            })
            .max()
            .unwrap_or(target_position);

        let blockers: Vec<GateId> = rows.iter().filter_map(|&r| self.cells[r][column]).collect();
        if !blockers.is_empty() {
            let to_move = self.shift_closure(blockers);
            let overflow = to_move
                .iter()
                .any(|id| self.column_of(*id).is_none_or(|c| c + 1 >= self.circuit_space));
            if overflow {
                return Err(IrError::GridFull(gate.name().to_string()));
            }
            self.shift_right(to_move);
        }

        let id = GateId(self.gates.len());
        for &r in &rows {
            self.cells[r][column] = Some(id);
        }
        gate.set_position(Some(column));
        self.gates.push(Some(gate));
        self.settle();
        Ok(id)
    }

    /// Remove a gate and close the gap it leaves.
    ///
    /// The gate must sit in the same column on every one of its rows. The
    /// returned gate keeps its qubits but loses its position.
    pub fn remove(&mut self, id: GateId) -> IrResult<PlacedGate> {
        let gate = self.gate(id).ok_or(IrError::GateNotFound)?;
        let column = gate.position().ok_or(IrError::GateNotFound)?;
        let rows: Vec<usize> = gate.qargs().iter().map(|q| q.index()).collect();
        if !rows
            .iter()
            .all(|&r| r < self.num_qubits && column < self.circuit_space && self.cells[r][column] == Some(id))
        {
            return Err(IrError::GateNotFound);
        }
        for &r in &rows {
            self.cells[r][column] = None;
        }
        let mut gate = self.gates[id.0].take().ok_or(IrError::GateNotFound)?;
        gate.reset(true);
        self.settle();
        Ok(gate)
    }

    /// Gates in row-major, left-to-right order, each exactly once.
    pub fn iter(&self) -> impl Iterator<Item = (GateId, &PlacedGate)> + '_ {
        let mut seen = FxHashSet::default();
        self.cells
            .iter()
            .flat_map(|row| row.iter().flatten().copied())
            .filter(move |id| seen.insert(*id))
            .filter_map(|id| self.gate(id).map(|g| (id, g)))
    }

    /// Gates in execution order: column by column, top to bottom.
    pub fn execution_order(&self) -> Vec<&PlacedGate> {
        let mut gates: Vec<&PlacedGate> = self.iter().map(|(_, g)| g).collect();
        gates.sort_by_key(|g| (g.position(), g.qargs().iter().min().copied()));
        gates
    }

    /// Whether no gate could move one column to the left.
    pub fn is_left_aligned(&self) -> bool {
        self.iter().all(|(_, gate)| match gate.position() {
            Some(0) | None => true,
            Some(c) => gate
                .qargs()
                .iter()
                .any(|q| self.cells[q.index()][c - 1].is_some()),
        })
    }

    fn column_of(&self, id: GateId) -> Option<usize> {
        self.gate(id).and_then(PlacedGate::position)
    }

    /// Gates that must move right, one column, to free the blockers' cells.
    fn shift_closure(&self, blockers: Vec<GateId>) -> FxHashSet<GateId> {
        let mut to_move = FxHashSet::default();
        let mut pending = blockers;
        while let Some(id) = pending.pop() {
            if !to_move.insert(id) {
                continue;
            }
            let (Some(gate), Some(col)) = (self.gate(id), self.column_of(id)) else {
                continue;
            };
            for q in gate.qargs() {
                if let Some(next) = self.cells[q.index()].get(col + 1).copied().flatten() {
                    pending.push(next);
                }
            }
        }
        to_move
    }

    fn shift_right(&mut self, to_move: FxHashSet<GateId>) {
        let mut ordered: Vec<(usize, GateId)> = to_move
            .into_iter()
            .filter_map(|id| self.column_of(id).map(|c| (c, id)))
            .collect();
        ordered.sort_unstable_by(|a, b| b.cmp(a));
        for (col, id) in ordered {
            self.move_gate(id, col, col + 1);
        }
    }

    /// Slide every gate left as far as its rows allow.
    fn settle(&mut self) {
        let mut ordered: Vec<(usize, GateId)> = self
            .gates
            .iter()
            .enumerate()
            .filter_map(|(i, g)| g.as_ref().and_then(PlacedGate::position).map(|c| (c, GateId(i))))
            .collect();
        ordered.sort_unstable();
        for (col, id) in ordered {
            let rows: Vec<usize> = match self.gate(id) {
                Some(g) => g.qargs().iter().map(|q| q.index()).collect(),
                None => continue,
            };
            let mut target = col;
            while target > 0 && rows.iter().all(|&r| self.cells[r][target - 1].is_none()) {
                target -= 1;
            }
            if target != col {
                self.move_gate(id, col, target);
            }
        }
    }

    fn move_gate(&mut self, id: GateId, from: usize, to: usize) {
        let Some(gate) = self.gates[id.0].as_mut() else {
            return;
        };
        for q in gate.qargs() {
            self.cells[q.index()][from] = None;
        }
        for q in gate.qargs() {
            self.cells[q.index()][to] = Some(id);
        }
        gate.set_position(Some(to));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::GateKind;

    fn single(kind: GateKind, q: u32) -> PlacedGate {
        PlacedGate::bound(kind, [QubitId(q)]).unwrap()
    }

    fn double(kind: GateKind, a: u32, b: u32) -> PlacedGate {
        PlacedGate::bound(kind, [QubitId(a), QubitId(b)]).unwrap()
    }

    #[test]
    fn test_place_slides_left() {
        let mut grid = CircuitGrid::new(2, 4);
        let id = grid.place(single(GateKind::H, 0), 3).unwrap();
        assert_eq!(grid.gate(id).unwrap().position(), Some(0));
        assert_eq!(grid.get(QubitId(0), 0), Some(id));
        assert!(grid.is_left_aligned());
    }

    #[test]
    fn test_place_inserts_and_shifts() {
        let mut grid = CircuitGrid::new(1, 4);
        let a = grid.place(single(GateKind::H, 0), 0).unwrap();
        let b = grid.place(single(GateKind::X, 0), 1).unwrap();
        let c = grid.place(single(GateKind::Z, 0), 1).unwrap();
        assert_eq!(grid.get(QubitId(0), 0), Some(a));
        assert_eq!(grid.get(QubitId(0), 1), Some(c));
        assert_eq!(grid.get(QubitId(0), 2), Some(b));
        assert_eq!(grid.gate(b).unwrap().position(), Some(2));
    }

    #[test]
    fn test_multi_qubit_gate_shares_column() {
        let mut grid = CircuitGrid::new(2, 4);
        grid.place(single(GateKind::H, 0), 0).unwrap();
        grid.place(single(GateKind::X, 0), 1).unwrap();
        let cx = grid.place(double(GateKind::CX, 1, 0), 3).unwrap();
        assert_eq!(grid.get(QubitId(0), 2), Some(cx));
        assert_eq!(grid.get(QubitId(1), 2), Some(cx));
        assert_eq!(grid.get(QubitId(1), 0), None);
        assert!(grid.is_left_aligned());
    }

    #[test]
    fn test_shift_carries_multi_qubit_gates() {
        let mut grid = CircuitGrid::new(2, 4);
        let h = grid.place(single(GateKind::H, 0), 0).unwrap();
        let cx = grid.place(double(GateKind::CX, 0, 1), 3).unwrap();
        let x = grid.place(single(GateKind::X, 1), 3).unwrap();
        assert_eq!(grid.gate(cx).unwrap().position(), Some(1));
        assert_eq!(grid.gate(x).unwrap().position(), Some(2));

        // insert before H on row 0: H, CX and X all move one column right
        let z = grid.place(single(GateKind::Z, 0), 0).unwrap();
        assert_eq!(grid.gate(z).unwrap().position(), Some(0));
        assert_eq!(grid.gate(h).unwrap().position(), Some(1));
        assert_eq!(grid.gate(cx).unwrap().position(), Some(2));
        assert_eq!(grid.get(QubitId(1), 2), Some(cx));
        assert_eq!(grid.gate(x).unwrap().position(), Some(3));
        assert!(grid.is_left_aligned());
    }

    #[test]
    fn test_full_grid_is_rejected_without_change() {
        let mut grid = CircuitGrid::new(1, 2);
        grid.place(single(GateKind::H, 0), 0).unwrap();
        grid.place(single(GateKind::X, 0), 1).unwrap();
        let err = grid.place(single(GateKind::Z, 0), 0).unwrap_err();
        assert!(matches!(err, IrError::GridFull(_)));
        assert_eq!(grid.len(), 2);
        assert_eq!(
            grid.iter().map(|(_, g)| g.name().to_string()).collect::<Vec<_>>(),
            vec!["H", "X"]
        );
    }

    #[test]
    fn test_remove_closes_gap() {
        let mut grid = CircuitGrid::new(1, 3);
        let a = grid.place(single(GateKind::H, 0), 0).unwrap();
        let b = grid.place(single(GateKind::X, 0), 1).unwrap();
        let removed = grid.remove(a).unwrap();
        assert_eq!(removed.position(), None);
        assert_eq!(removed.qargs(), &[QubitId(0)]);
        assert_eq!(grid.gate(b).unwrap().position(), Some(0));
        assert!(matches!(grid.remove(a), Err(IrError::GateNotFound)));
    }

    #[test]
    fn test_iter_yields_each_gate_once() {
        let mut grid = CircuitGrid::new(3, 3);
        grid.place(double(GateKind::Swap, 0, 2), 0).unwrap();
        grid.place(single(GateKind::H, 1), 0).unwrap();
        let names: Vec<_> = grid.iter().map(|(_, g)| g.name().to_string()).collect();
        assert_eq!(names, vec!["SWAP", "H"]);
        assert_eq!(grid.execution_order().len(), 2);
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut grid = CircuitGrid::new(1, 2);
        assert!(matches!(
            grid.place(PlacedGate::new(GateKind::H), 0),
            Err(IrError::UnboundGate(_))
        ));
        assert!(matches!(
            grid.place(single(GateKind::H, 0), 2),
            Err(IrError::PositionOutOfRange { .. })
        ));
        assert!(matches!(
            grid.place(single(GateKind::H, 1), 0),
            Err(IrError::QubitOutOfRange { .. })
        ));
    }
}
