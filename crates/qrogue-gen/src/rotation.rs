//! Input-state rotations.

use std::f64::consts::TAU;

use rand::Rng;
use rand::seq::index;

use qrogue_ir::{GateKind, PlacedGate, QubitId};

use crate::difficulty::ResolvedDifficulty;
use crate::error::GenResult;

/// A rotation angle for the given randomization degree.
///
/// Degree 0 draws freely from (0, 2π). Otherwise the angle is `k·2π/degree`
/// for a uniform `k` in `1..=degree`.
pub fn rotation_angle<R: Rng + ?Sized>(rng: &mut R, degree: usize) -> f64 {
    if degree == 0 {
        rng.gen_range(f64::EPSILON..TAU)
    } else {
        let k = rng.gen_range(1..=degree);
        k as f64 * TAU / degree as f64
    }
}

/// Rotation gates that turn |0…0⟩ into a puzzle's input state.
///
/// `rotated_qubits` distinct qubits get an RY; `second_rotations` of them
/// also get an RZ right after it. Gates are ordered by qubit.
pub fn prepare_rotation_gates<R: Rng + ?Sized>(
    rng: &mut R,
    num_qubits: usize,
    difficulty: &ResolvedDifficulty,
) -> GenResult<Vec<PlacedGate>> {
    let rotated = difficulty.rotated_qubits.min(num_qubits);
    let qubits = index::sample(rng, num_qubits, rotated).into_vec();
    let second = difficulty.second_rotations.min(rotated);
    let mut twice = index::sample(rng, rotated, second).into_vec();
    twice.sort_unstable();

    let degree = difficulty.randomization_degree;
    let mut gates = Vec::with_capacity(rotated + second);
    for (i, q) in qubits.into_iter().enumerate() {
        let qubit = QubitId::from(q);
        gates.push(PlacedGate::bound(
            GateKind::Ry(rotation_angle(rng, degree)),
            [qubit],
        )?);
        if twice.binary_search(&i).is_ok() {
            gates.push(PlacedGate::bound(
                GateKind::Rz(rotation_angle(rng, degree)),
                [qubit],
            )?);
        }
    }
    gates.sort_by_key(|g| g.qargs()[0]);
    Ok(gates)
}
