//! Simulator backend implementation.

use num_complex::Complex64;
use tracing::{debug, instrument};

use qrogue_hal::{HalError, HalResult, SimulationBackend};
use qrogue_ir::{GateKind, IrError, QubitId};

use crate::statevector::Statevector;

/// One appended gate.
#[derive(Debug, Clone)]
struct SimOp {
    gate: GateKind,
    inverse: bool,
    qubits: Vec<usize>,
}

/// A circuit under construction for the [`StatevectorBackend`].
#[derive(Debug, Clone)]
pub struct SimCircuit {
    num_qubits: usize,
    ops: Vec<SimOp>,
}

impl SimCircuit {
    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of appended gates.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether no gate was appended yet.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    fn execute(&self, mut sv: Statevector) -> Statevector {
        for op in &self.ops {
            sv.apply_gate(&op.gate, &op.qubits, op.inverse);
        }
        sv
    }
}

/// Local exact simulator.
///
/// Circuits up to `max_qubits` qubits are supported; unitaries are built
/// column by column, so `run_unitary` costs `2^n` statevector runs.
pub struct StatevectorBackend {
    max_qubits: usize,
}

impl StatevectorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self { max_qubits: 12 }
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: usize) -> Self {
        Self { max_qubits }
    }

    /// Largest supported circuit width.
    pub fn max_qubits(&self) -> usize {
        self.max_qubits
    }
}

impl Default for StatevectorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationBackend for StatevectorBackend {
    type Circuit = SimCircuit;

    fn name(&self) -> &str {
        "statevector"
    }

    fn build_circuit(&self, num_qubits: usize) -> HalResult<SimCircuit> {
        if num_qubits == 0 || num_qubits > self.max_qubits {
            return Err(HalError::CircuitTooLarge(format!(
                "{num_qubits} qubits requested, simulator supports 1..={}",
                self.max_qubits
            )));
        }
        Ok(SimCircuit {
            num_qubits,
            ops: Vec::new(),
        })
    }

    fn append(
        &self,
        circuit: &mut SimCircuit,
        gate: &GateKind,
        inverse: bool,
        qargs: &[QubitId],
    ) -> HalResult<()> {
        let expected = gate.num_qubits();
        if qargs.len() != expected as usize {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected,
                got: qargs.len() as u32,
            }
            .into());
        }
        for (i, q) in qargs.iter().enumerate() {
            if q.index() >= circuit.num_qubits {
                return Err(IrError::QubitOutOfRange {
                    qubit: *q,
                    num_qubits: circuit.num_qubits,
                }
                .into());
            }
            if qargs[..i].contains(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: *q,
                    gate_name: gate.name().to_string(),
                }
                .into());
            }
        }
        circuit.ops.push(SimOp {
            gate: gate.clone(),
            inverse,
            qubits: qargs.iter().map(|q| q.index()).collect(),
        });
        Ok(())
    }

    #[instrument(level = "trace", skip_all, fields(qubits = circuit.num_qubits, ops = circuit.ops.len()))]
    fn run_statevector(&self, circuit: &SimCircuit) -> HalResult<Vec<Complex64>> {
        let sv = circuit.execute(Statevector::new(circuit.num_qubits));
        debug_assert_eq!(sv.num_qubits(), circuit.num_qubits);
        Ok(sv.into_amplitudes())
    }

    #[instrument(level = "trace", skip_all, fields(qubits = circuit.num_qubits, ops = circuit.ops.len()))]
    fn run_unitary(
        &self,
        circuit: &SimCircuit,
        decimals: Option<u32>,
    ) -> HalResult<Vec<Vec<Complex64>>> {
        let dim = 1 << circuit.num_qubits;
        let mut rows = vec![vec![Complex64::new(0.0, 0.0); dim]; dim];
        for col in 0..dim {
            let column = circuit
                .execute(Statevector::basis(circuit.num_qubits, col))
                .into_amplitudes();
            for (row, value) in column.into_iter().enumerate() {
                rows[row][col] = match decimals {
                    Some(d) => round_complex(value, d),
                    None => value,
                };
            }
        }
        debug!(dim, "built unitary");
        Ok(rows)
    }
}

fn round_complex(value: Complex64, decimals: u32) -> Complex64 {
    let scale = 10f64.powi(decimals as i32);
    Complex64::new(
        (value.re * scale).round() / scale,
        (value.im * scale).round() / scale,
    )
}
