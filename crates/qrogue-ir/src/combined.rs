//! Combined (fused) gates.
//!
//! A combined gate wraps several already-bound gates into one opaque gate.
//! Its unitary is computed once by a simulation backend when the gate is
//! created; this module only covers validation and qubit layout.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gate::GateKind;
use crate::placed::PlacedGate;
use crate::qubit::QubitId;

/// Why a set of gates cannot be combined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CombineError {
    /// Fewer sub-gates than the rules allow.
    #[error("Need at least {min} gates to combine, got {got}")]
    TooFewGates {
        /// Minimum allowed.
        min: usize,
        /// Number given.
        got: usize,
    },

    /// More sub-gates than the rules allow.
    #[error("Can combine at most {max} gates, got {got}")]
    TooManyGates {
        /// Maximum allowed.
        max: usize,
        /// Number given.
        got: usize,
    },

    /// Not enough fuse credits.
    #[error("Combining needs {required} fuse credits, only {available} available")]
    InsufficientCredits {
        /// Credits the combination costs.
        required: usize,
        /// Credits the player has.
        available: usize,
    },

    /// A sub-gate is itself a combined gate.
    #[error("Sub-gate {index} is already a combined gate")]
    NestedCombination {
        /// Index of the offending sub-gate.
        index: usize,
    },

    /// A sub-gate has no complete qubit binding.
    #[error("Sub-gate {index} is not bound to qubits")]
    UnboundSubGate {
        /// Index of the offending sub-gate.
        index: usize,
    },
}

/// Limits on how many gates one combination may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinationRules {
    /// Smallest allowed number of sub-gates.
    pub min_gates: usize,
    /// Largest allowed number of sub-gates.
    pub max_gates: usize,
}

impl Default for CombinationRules {
    fn default() -> Self {
        Self {
            min_gates: 2,
            max_gates: 5,
        }
    }
}

impl CombinationRules {
    /// Fuse credits needed to combine `num_gates` gates: one per fuse.
    pub fn cost(num_gates: usize) -> usize {
        num_gates.saturating_sub(1)
    }

    /// Check whether `sub_gates` may be combined with `fuse_credits`.
    ///
    /// Returns the credit cost on success.
    pub fn validate(
        &self,
        sub_gates: &[PlacedGate],
        fuse_credits: usize,
    ) -> Result<usize, CombineError> {
        let got = sub_gates.len();
        if got < self.min_gates {
            return Err(CombineError::TooFewGates {
                min: self.min_gates,
                got,
            });
        }
        if got > self.max_gates {
            return Err(CombineError::TooManyGates {
                max: self.max_gates,
                got,
            });
        }
        for (index, gate) in sub_gates.iter().enumerate() {
            if matches!(gate.kind(), GateKind::Combined(_)) {
                return Err(CombineError::NestedCombination { index });
            }
            if !gate.qargs_complete() {
                return Err(CombineError::UnboundSubGate { index });
            }
        }
        let required = Self::cost(got);
        if required > fuse_credits {
            return Err(CombineError::InsufficientCredits {
                required,
                available: fuse_credits,
            });
        }
        Ok(required)
    }
}

/// Qubit layout of a prospective combined gate.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedLayout {
    /// Global qubits touched, ascending. Local qubit `i` is `qubits[i]`.
    pub qubits: Vec<QubitId>,
    /// Sub-gates rewritten onto local qubits `0..qubits.len()`.
    pub local_gates: Vec<PlacedGate>,
}

impl CombinedLayout {
    /// Compute the layout of bound `sub_gates`.
    pub fn of(sub_gates: &[PlacedGate]) -> Self {
        let mut qubits: Vec<QubitId> = sub_gates
            .iter()
            .flat_map(|g| g.qargs().iter().copied())
            .collect();
        qubits.sort_unstable();
        qubits.dedup();
        let local_gates = sub_gates
            .iter()
            .map(|g| {
                g.remapped(|q| {
                    let local = qubits.binary_search(&q).unwrap_or_default();
                    QubitId::from(local)
                })
            })
            .collect();
        Self {
            qubits,
            local_gates,
        }
    }
}

/// A fused gate with a precomputed unitary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedGate {
    label: String,
    num_qubits: u32,
    sub_gates: Vec<PlacedGate>,
    /// Row-major `2^n × 2^n` unitary.
    matrix: Vec<Complex64>,
}

impl CombinedGate {
    /// Assemble a combined gate from local sub-gates and their unitary.
    ///
    /// # Panics
    ///
    /// Panics if `matrix.len()` does not equal `(2^num_qubits)^2`.
    pub fn new(
        label: impl Into<String>,
        num_qubits: u32,
        sub_gates: Vec<PlacedGate>,
        matrix: Vec<Complex64>,
    ) -> Self {
        let dim = 1usize << num_qubits;
        assert_eq!(
            matrix.len(),
            dim * dim,
            "Matrix length {} does not match expected {} for {}-qubit gate",
            matrix.len(),
            dim * dim,
            num_qubits,
        );
        Self {
            label: label.into(),
            num_qubits,
            sub_gates,
            matrix,
        }
    }

    /// Player-chosen label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of qubits the fused gate spans.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Sub-gates on local qubits.
    pub fn sub_gates(&self) -> &[PlacedGate] {
        &self.sub_gates
    }

    /// Row-major unitary.
    pub fn matrix(&self) -> &[Complex64] {
        &self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bound(kind: GateKind, qubits: &[u32]) -> PlacedGate {
        PlacedGate::bound(kind, qubits.iter().map(|q| QubitId(*q))).unwrap()
    }

    #[test]
    fn test_validation_codes() {
        let rules = CombinationRules::default();
        let h = bound(GateKind::H, &[0]);
        let x = bound(GateKind::X, &[1]);

        assert_eq!(
            rules.validate(&[h.clone()], 10),
            Err(CombineError::TooFewGates { min: 2, got: 1 })
        );
        assert_eq!(
            rules.validate(&vec![h.clone(); 6], 10),
            Err(CombineError::TooManyGates { max: 5, got: 6 })
        );
        assert_eq!(
            rules.validate(&[h.clone(), PlacedGate::new(GateKind::CX)], 10),
            Err(CombineError::UnboundSubGate { index: 1 })
        );
        assert_eq!(
            rules.validate(&[h.clone(), x.clone(), x.clone()], 1),
            Err(CombineError::InsufficientCredits {
                required: 2,
                available: 1
            })
        );
        assert_eq!(rules.validate(&[h, x], 1), Ok(1));
    }

    #[test]
    fn test_nested_combination_rejected() {
        let inner = CombinedGate::new(
            "inner",
            1,
            vec![bound(GateKind::X, &[0])],
            vec![
                Complex64::new(0.0, 0.0),
                Complex64::new(1.0, 0.0),
                Complex64::new(1.0, 0.0),
                Complex64::new(0.0, 0.0),
            ],
        );
        let nested = bound(GateKind::Combined(inner), &[0]);
        let rules = CombinationRules::default();
        assert_eq!(
            rules.validate(&[bound(GateKind::H, &[0]), nested], 5),
            Err(CombineError::NestedCombination { index: 1 })
        );
    }

    #[test]
    fn test_layout_remaps_to_local_qubits() {
        let gates = [bound(GateKind::H, &[3]), bound(GateKind::CX, &[3, 1])];
        let layout = CombinedLayout::of(&gates);
        assert_eq!(layout.qubits, vec![QubitId(1), QubitId(3)]);
        assert_eq!(layout.local_gates[0].qargs(), &[QubitId(1)]);
        assert_eq!(layout.local_gates[1].qargs(), &[QubitId(1), QubitId(0)]);
    }
}
