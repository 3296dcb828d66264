//! Gates bound to qubits and grid positions.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::GateKind;
use crate::qubit::QubitId;

/// Binding state of a [`PlacedGate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Not every qubit argument is assigned.
    Unbound,
    /// All qubits assigned, no grid position.
    Bound,
    /// Qubits assigned and positioned in a grid.
    Placed,
}

/// A gate kind together with its qubit arguments and grid position.
///
/// Copying a gate means cloning this record; two holders never share one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedGate {
    kind: GateKind,
    qargs: Vec<QubitId>,
    position: Option<usize>,
}

impl PlacedGate {
    /// An unbound gate.
    pub fn new(kind: GateKind) -> Self {
        Self {
            qargs: Vec::with_capacity(kind.num_qubits() as usize),
            kind,
            position: None,
        }
    }

    /// A gate bound to `qargs`.
    pub fn bound(kind: GateKind, qargs: impl IntoIterator<Item = QubitId>) -> IrResult<Self> {
        let qargs: Vec<QubitId> = qargs.into_iter().collect();
        let expected = kind.num_qubits();
        if qargs.len() != expected as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: kind.name().to_string(),
                expected,
                got: qargs.len() as u32,
            });
        }
        for (i, q) in qargs.iter().enumerate() {
            if qargs[..i].contains(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: *q,
                    gate_name: kind.name().to_string(),
                });
            }
        }
        Ok(Self {
            kind,
            qargs,
            position: None,
        })
    }

    /// The gate kind.
    pub fn kind(&self) -> &GateKind {
        &self.kind
    }

    /// Assigned qubits, in argument order.
    pub fn qargs(&self) -> &[QubitId] {
        &self.qargs
    }

    /// Grid column, once placed.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Number of qubits the gate needs.
    pub fn arity(&self) -> usize {
        self.kind.num_qubits() as usize
    }

    /// Whether every qubit argument is assigned.
    pub fn qargs_complete(&self) -> bool {
        self.qargs.len() == self.arity()
    }

    /// Current binding state.
    pub fn state(&self) -> GateState {
        match (self.qargs_complete(), self.position) {
            (false, _) => GateState::Unbound,
            (true, None) => GateState::Bound,
            (true, Some(_)) => GateState::Placed,
        }
    }

    /// Assign the next qubit argument.
    ///
    /// `qubit` is appended only if it is not yet used and the arity is not
    /// met. Returns whether more qubits are still needed.
    pub fn use_qubit(&mut self, qubit: QubitId) -> bool {
        if !self.qargs_complete() && !self.qargs.contains(&qubit) {
            self.qargs.push(qubit);
        }
        !self.qargs_complete()
    }

    /// Fix the grid column. Only succeeds once the qubits are complete.
    pub fn use_position(&mut self, position: usize) -> bool {
        if self.qargs_complete() {
            self.position = Some(position);
            true
        } else {
            false
        }
    }

    /// Clear the position, and the qubits unless `skip_qargs` is set.
    pub fn reset(&mut self, skip_qargs: bool) {
        self.position = None;
        if !skip_qargs {
            self.qargs.clear();
        }
    }

    /// Whether `self` applied right after `other` restores the state.
    ///
    /// Both gates must act on the same qubits (SWAP in either order).
    pub fn cancels(&self, other: &PlacedGate) -> bool {
        if !self.qargs_complete() || !other.qargs_complete() {
            return false;
        }
        let same_qubits = match self.kind {
            GateKind::Swap => {
                self.qargs.len() == other.qargs.len()
                    && self.qargs.iter().all(|q| other.qargs.contains(q))
            }
            _ => self.qargs == other.qargs,
        };
        same_qubits && self.kind.undoes(&other.kind)
    }

    /// Copy of this gate with its qubits translated through `map`.
    pub(crate) fn remapped(&self, map: impl Fn(QubitId) -> QubitId) -> PlacedGate {
        PlacedGate {
            kind: self.kind.clone(),
            qargs: self.qargs.iter().map(|q| map(*q)).collect(),
            position: None,
        }
    }

    pub(crate) fn set_position(&mut self, position: Option<usize>) {
        self.position = position;
    }
}
