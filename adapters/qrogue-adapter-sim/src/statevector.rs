//! Statevector simulation engine.

use num_complex::Complex64;
use std::f64::consts::FRAC_PI_2;

use qrogue_ir::GateKind;

/// A statevector representing a quantum state.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        Self::basis(num_qubits, 0)
    }

    /// Create the computational basis state `index`.
    pub fn basis(num_qubits: usize, index: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[index] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Consume the statevector, returning its amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Apply a gate, or its inverse, to specific qubits.
    ///
    /// Qubit arguments are assumed valid; the backend checks them when the
    /// gate is appended.
    pub fn apply_gate(&mut self, gate: &GateKind, qubits: &[usize], inverse: bool) {
        let sign = if inverse { -1.0 } else { 1.0 };
        match gate {
            GateKind::I => {}
            GateKind::X => self.apply_x(qubits[0]),
            GateKind::Y => self.apply_y(qubits[0]),
            GateKind::Z => self.apply_z(qubits[0]),
            GateKind::H => self.apply_h(qubits[0]),
            GateKind::S => self.apply_phase(qubits[0], sign * FRAC_PI_2),
            GateKind::Ry(theta) => self.apply_ry(qubits[0], sign * theta),
            GateKind::Rz(theta) => self.apply_rz(qubits[0], sign * theta),
            GateKind::Swap => self.apply_swap(qubits[0], qubits[1]),
            GateKind::CX => self.apply_cx(qubits[0], qubits[1]),
            GateKind::Combined(c) => self.apply_matrix(c.matrix(), qubits, inverse),
        }
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] *= phase;
            }
        }
    }

    fn apply_ry(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - s * b;
                self.amplitudes[j] = s * a + c * b;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                self.amplitudes[i] *= phase_0;
            } else {
                self.amplitudes[i] *= phase_1;
            }
        }
    }

    // =========================================================================
    // Two-qubit gate implementations
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..(1 << self.num_qubits) {
            let b1 = (i & mask1) != 0;
            let b2 = (i & mask2) != 0;
            if b1 && !b2 {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    // =========================================================================
    // Arbitrary k-qubit unitaries
    // =========================================================================

    /// Apply a row-major `2^k × 2^k` matrix on `qubits`.
    ///
    /// Local qubit `b` of the matrix is bit `b` of its row/column index and
    /// maps to `qubits[b]`. With `dagger` set the conjugate transpose is used.
    fn apply_matrix(&mut self, matrix: &[Complex64], qubits: &[usize], dagger: bool) {
        let dim = 1 << qubits.len();
        let gate_mask: usize = qubits.iter().map(|q| 1 << q).sum();
        let offsets: Vec<usize> = (0..dim)
            .map(|local| {
                qubits
                    .iter()
                    .enumerate()
                    .filter(|(b, _)| local & (1 << b) != 0)
                    .map(|(_, q)| 1 << q)
                    .sum()
            })
            .collect();

        let mut input = vec![Complex64::new(0.0, 0.0); dim];
        for base in 0..(1 << self.num_qubits) {
            if base & gate_mask != 0 {
                continue;
            }
            for (l, off) in offsets.iter().enumerate() {
                input[l] = self.amplitudes[base | off];
            }
            for (r, off) in offsets.iter().enumerate() {
                let mut acc = Complex64::new(0.0, 0.0);
                for (c, value) in input.iter().enumerate() {
                    let m = if dagger {
                        matrix[c * dim + r].conj()
                    } else {
                        matrix[r * dim + c]
                    };
                    acc += m * value;
                }
                self.amplitudes[base | off] = acc;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrogue_ir::{CombinedGate, PlacedGate, QubitId};

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(0.0, 0.0)));
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1);
        sv.apply_gate(&GateKind::H, &[0], false);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        sv.apply_gate(&GateKind::H, &[0], false);
        sv.apply_gate(&GateKind::CX, &[0, 1], false);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_s_and_inverse() {
        let mut sv = Statevector::basis(1, 1);
        sv.apply_gate(&GateKind::S, &[0], false);
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 1.0)));
        sv.apply_gate(&GateKind::S, &[0], true);
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_swap_moves_excitation() {
        let mut sv = Statevector::basis(2, 0b01);
        sv.apply_gate(&GateKind::Swap, &[0, 1], false);
        assert!(approx_eq(sv.amplitudes[0b10], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_matrix_matches_native_cx() {
        // CX with local control 1, target 0, as seen by `apply_matrix`
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        #[rustfmt::skip]
        let matrix = vec![
            one, zero, zero, zero,
            zero, one, zero, zero,
            zero, zero, zero, one,
            zero, zero, one, zero,
        ];
        let gate = CombinedGate::new(
            "cx10",
            2,
            vec![PlacedGate::bound(GateKind::CX, [QubitId(1), QubitId(0)]).unwrap()],
            matrix,
        );

        for start in 0..8 {
            let mut native = Statevector::basis(3, start);
            native.apply_gate(&GateKind::CX, &[2, 0], false);
            let mut fused = Statevector::basis(3, start);
            fused.apply_gate(&GateKind::Combined(gate.clone()), &[0, 2], false);
            for (a, b) in native.amplitudes.iter().zip(&fused.amplitudes) {
                assert!(approx_eq(*a, *b));
            }
        }
    }
}
