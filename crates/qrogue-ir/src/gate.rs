//! Gate catalog and gate kinds.
//!
//! [`GateType`] is the fixed catalog entry (names, arity, description).
//! [`GateKind`] is a concrete gate: a catalog entry plus its parameters.

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::combined::CombinedGate;
use crate::error::{IrError, IrResult};

/// Catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateType {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// Hadamard.
    H,
    /// Phase gate (sqrt(Z)).
    S,
    /// Rotation around Y.
    Ry,
    /// Rotation around Z.
    Rz,
    /// SWAP.
    Swap,
    /// Controlled-X.
    CX,
    /// Several gates fused into one.
    Combined,
}

impl GateType {
    /// Every catalog entry.
    pub const ALL: [GateType; 11] = [
        GateType::I,
        GateType::X,
        GateType::Y,
        GateType::Z,
        GateType::H,
        GateType::S,
        GateType::Ry,
        GateType::Rz,
        GateType::Swap,
        GateType::CX,
        GateType::Combined,
    ];

    /// Canonical short name.
    pub fn name(self) -> &'static str {
        match self {
            GateType::I => "I",
            GateType::X => "X",
            GateType::Y => "Y",
            GateType::Z => "Z",
            GateType::H => "H",
            GateType::S => "S",
            GateType::Ry => "RY",
            GateType::Rz => "RZ",
            GateType::Swap => "SWAP",
            GateType::CX => "CX",
            GateType::Combined => "Combined",
        }
    }

    /// Every name the gate answers to, canonical name first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            GateType::I => &["I", "Id", "Identity"],
            GateType::X => &["X", "Pauli X", "NOT", "Bit Flip"],
            GateType::Y => &["Y", "Pauli Y"],
            GateType::Z => &["Z", "Pauli Z", "Phase Flip"],
            GateType::H => &["H", "Hadamard"],
            GateType::S => &["S", "Phase", "Sqrt Z"],
            GateType::Ry => &["RY", "Rotation Y", "Y Rotation"],
            GateType::Rz => &["RZ", "Rotation Z", "Z Rotation"],
            GateType::Swap => &["SWAP"],
            GateType::CX => &["CX", "CNOT", "Controlled X", "Controlled NOT"],
            GateType::Combined => &["Combined", "Fused", "Macro"],
        }
    }

    /// Number of qubits, or `None` for combined gates whose arity depends
    /// on their content.
    pub fn fixed_arity(self) -> Option<u32> {
        match self {
            GateType::Swap | GateType::CX => Some(2),
            GateType::Combined => None,
            _ => Some(1),
        }
    }

    /// Whether the gate carries a rotation angle.
    pub fn is_rotation(self) -> bool {
        matches!(self, GateType::Ry | GateType::Rz)
    }

    /// Player-facing description.
    pub fn description(self) -> &'static str {
        match self {
            GateType::I => "Does nothing. Occupies a slot without changing the state.",
            GateType::X => "Flips |0> and |1>, the quantum NOT.",
            GateType::Y => "Flips the qubit and adds an imaginary phase.",
            GateType::Z => "Negates the amplitude of |1>.",
            GateType::H => "Creates an equal superposition from a basis state and back.",
            GateType::S => "Multiplies the amplitude of |1> by i.",
            GateType::Ry => "Rotates the qubit around the Y axis by an angle.",
            GateType::Rz => "Rotates the qubit around the Z axis by an angle.",
            GateType::Swap => "Exchanges the states of two qubits.",
            GateType::CX => "Flips the target qubit if the control qubit is |1>.",
            GateType::Combined => "Several gates fused into a single one.",
        }
    }

    /// Resolve a gate name.
    ///
    /// Matching ignores case, whitespace, `_` and `-`, strips an optional
    /// trailing "Gate", and accepts every alias.
    pub fn from_name(name: &str) -> IrResult<GateType> {
        let wanted = normalize_name(name);
        let wanted = match wanted.strip_suffix("gate") {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => wanted,
        };
        GateType::ALL
            .into_iter()
            .find(|ty| ty.aliases().iter().any(|a| normalize_name(a) == wanted))
            .ok_or_else(|| IrError::UnknownGate(name.to_string()))
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A concrete gate: catalog entry plus parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// Hadamard.
    H,
    /// Phase gate.
    S,
    /// Rotation around Y by the given angle.
    Ry(f64),
    /// Rotation around Z by the given angle.
    Rz(f64),
    /// SWAP.
    Swap,
    /// Controlled-X, control first.
    CX,
    /// Fused sub-circuit.
    Combined(CombinedGate),
}

impl GateKind {
    /// Catalog entry of this gate.
    pub fn gate_type(&self) -> GateType {
        match self {
            GateKind::I => GateType::I,
            GateKind::X => GateType::X,
            GateKind::Y => GateType::Y,
            GateKind::Z => GateType::Z,
            GateKind::H => GateType::H,
            GateKind::S => GateType::S,
            GateKind::Ry(_) => GateType::Ry,
            GateKind::Rz(_) => GateType::Rz,
            GateKind::Swap => GateType::Swap,
            GateKind::CX => GateType::CX,
            GateKind::Combined(_) => GateType::Combined,
        }
    }

    /// Display name. Combined gates report their label.
    pub fn name(&self) -> &str {
        match self {
            GateKind::Combined(c) => c.label(),
            other => other.gate_type().name(),
        }
    }

    /// Number of qubits the gate acts on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Combined(c) => c.num_qubits(),
            other => other.gate_type().fixed_arity().unwrap_or(1),
        }
    }

    /// Rotation angle, if any.
    pub fn angle(&self) -> Option<f64> {
        match self {
            GateKind::Ry(theta) | GateKind::Rz(theta) => Some(*theta),
            _ => None,
        }
    }

    /// Whether applying the gate twice is the identity.
    pub fn is_self_inverse(&self) -> bool {
        matches!(
            self,
            GateKind::I
                | GateKind::X
                | GateKind::Y
                | GateKind::Z
                | GateKind::H
                | GateKind::Swap
                | GateKind::CX
        )
    }

    /// Whether `self` directly after `other` is the identity, up to global
    /// phase, assuming both act on the same qubits.
    pub fn undoes(&self, other: &GateKind) -> bool {
        match (self, other) {
            (GateKind::Ry(a), GateKind::Ry(b)) | (GateKind::Rz(a), GateKind::Rz(b)) => {
                let r = (a + b).rem_euclid(TAU);
                r < 1e-9 || TAU - r < 1e-9
            }
            (a, b) => a.is_self_inverse() && a == b,
        }
    }

    /// Build a gate of the given catalog type.
    ///
    /// Rotations need `angle`; combined gates cannot be built this way.
    pub fn from_type(ty: GateType, angle: Option<f64>) -> IrResult<GateKind> {
        let rotation = |f: fn(f64) -> GateKind| {
            angle
                .map(f)
                .ok_or_else(|| IrError::MissingParameter(ty.name().to_string()))
        };
        match ty {
            GateType::I => Ok(GateKind::I),
            GateType::X => Ok(GateKind::X),
            GateType::Y => Ok(GateKind::Y),
            GateType::Z => Ok(GateKind::Z),
            GateType::H => Ok(GateKind::H),
            GateType::S => Ok(GateKind::S),
            GateType::Ry => rotation(GateKind::Ry),
            GateType::Rz => rotation(GateKind::Rz),
            GateType::Swap => Ok(GateKind::Swap),
            GateType::CX => Ok(GateKind::CX),
            GateType::Combined => Err(IrError::UnknownGate(ty.name().to_string())),
        }
    }
}

impl FromStr for GateKind {
    type Err = IrError;

    /// Parse `"H"`, `"cnot"`, `"RY(1.5708)"` and similar.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, angle) = match s.split_once('(') {
            Some((name, rest)) => {
                let value = rest.strip_suffix(')').unwrap_or(rest).trim();
                let angle = value.parse::<f64>().map_err(|_| IrError::InvalidParameter {
                    gate_name: name.trim().to_string(),
                    value: value.to_string(),
                })?;
                (name, Some(angle))
            }
            None => (s, None),
        };
        GateKind::from_type(GateType::from_name(name)?, angle)
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.angle() {
            Some(theta) => write!(f, "{}({theta:.4})", self.name()),
            None => f.write_str(self.name()),
        }
    }
}
