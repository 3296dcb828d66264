//! Difficulty profiles.
//!
//! A profile maps each [`DifficultyDimension`] to an integer once the qubit
//! count and circuit space of a puzzle are known. [`PuzzleDifficulty`] is the
//! serde-friendly implementation used by configuration files; callers with
//! their own progression logic implement [`DifficultyProfile`] directly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenError;

/// Randomization degree used as the base of relative degree values.
pub const DEFAULT_RANDOMIZATION_BASE: usize = 8;

/// Named difficulty dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyDimension {
    /// Number of target gates to place.
    CircuitLength,
    /// Qubits rotated to build the input state.
    RotatedQubits,
    /// Rotated qubits that also get a second-axis rotation.
    SecondRotations,
    /// Angle grid size; 0 means unrestricted angles.
    RandomizationDegree,
    /// Extra edits granted to the player.
    BonusEdits,
}

impl DifficultyDimension {
    /// All dimensions.
    pub const ALL: [DifficultyDimension; 5] = [
        DifficultyDimension::CircuitLength,
        DifficultyDimension::RotatedQubits,
        DifficultyDimension::SecondRotations,
        DifficultyDimension::RandomizationDegree,
        DifficultyDimension::BonusEdits,
    ];

    /// The quantity a relative value of this dimension is a fraction of.
    pub fn relative_base(self, num_qubits: usize, circuit_space: usize) -> usize {
        match self {
            DifficultyDimension::CircuitLength | DifficultyDimension::BonusEdits => circuit_space,
            DifficultyDimension::RotatedQubits | DifficultyDimension::SecondRotations => num_qubits,
            DifficultyDimension::RandomizationDegree => DEFAULT_RANDOMIZATION_BASE,
        }
    }
}

/// All dimensions resolved for one puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolvedDifficulty {
    /// Target gates to place.
    pub circuit_length: usize,
    /// Qubits carrying an input rotation, at most the qubit count.
    pub rotated_qubits: usize,
    /// Rotated qubits with a second rotation, at most `rotated_qubits`.
    pub second_rotations: usize,
    /// Angle grid size.
    pub randomization_degree: usize,
    /// Extra player edits.
    pub bonus_edits: usize,
}

/// Source of per-puzzle difficulty values.
pub trait DifficultyProfile {
    /// Integer value of `dimension` for a puzzle of the given size.
    fn absolute_value(
        &self,
        dimension: DifficultyDimension,
        num_qubits: usize,
        circuit_space: usize,
    ) -> usize;

    /// Every dimension at once.
    ///
    /// Rotation counts are clamped so they never exceed the qubits they
    /// refer to.
    fn resolve(&self, num_qubits: usize, circuit_space: usize) -> ResolvedDifficulty {
        let value = |d| self.absolute_value(d, num_qubits, circuit_space);
        let rotated_qubits = value(DifficultyDimension::RotatedQubits).min(num_qubits);
        ResolvedDifficulty {
            circuit_length: value(DifficultyDimension::CircuitLength),
            rotated_qubits,
            second_rotations: value(DifficultyDimension::SecondRotations).min(rotated_qubits),
            randomization_degree: value(DifficultyDimension::RandomizationDegree),
            bonus_edits: value(DifficultyDimension::BonusEdits),
        }
    }
}

impl DifficultyProfile for ResolvedDifficulty {
    fn absolute_value(&self, dimension: DifficultyDimension, _: usize, _: usize) -> usize {
        match dimension {
            DifficultyDimension::CircuitLength => self.circuit_length,
            DifficultyDimension::RotatedQubits => self.rotated_qubits,
            DifficultyDimension::SecondRotations => self.second_rotations,
            DifficultyDimension::RandomizationDegree => self.randomization_degree,
            DifficultyDimension::BonusEdits => self.bonus_edits,
        }
    }
}

/// A dimension value, either fixed or a fraction of the dimension's base.
///
/// In YAML, integers are absolute and floats are relative:
/// `circuit_length: 4` versus `circuit_length: 0.8`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DimensionValue {
    /// Fixed value.
    Absolute(usize),
    /// Fraction of the base, rounded to the nearest integer.
    Relative(f64),
}

impl DimensionValue {
    /// Resolve against `base`.
    pub fn resolve(self, base: usize) -> usize {
        match self {
            DimensionValue::Absolute(v) => v,
            DimensionValue::Relative(r) => (base as f64 * r.max(0.0)).round() as usize,
        }
    }
}

/// Preset names accepted by [`PuzzleDifficulty::from_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DifficultyLevel {
    /// Unrotated input, short circuits.
    Easy,
    /// Some rotated qubits on a coarse angle grid.
    Medium,
    /// Fully rotated input with free angles.
    Hard,
}

/// Serializable difficulty profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PuzzleDifficulty {
    /// Target gates to place.
    pub circuit_length: DimensionValue,
    /// Qubits carrying an input rotation.
    pub rotated_qubits: DimensionValue,
    /// Rotated qubits with a second rotation.
    #[serde(default = "zero")]
    pub second_rotations: DimensionValue,
    /// Angle grid size; 0 means unrestricted.
    #[serde(default = "default_degree")]
    pub randomization_degree: DimensionValue,
    /// Extra player edits.
    #[serde(default = "zero")]
    pub bonus_edits: DimensionValue,
}

fn zero() -> DimensionValue {
    DimensionValue::Absolute(0)
}

fn default_degree() -> DimensionValue {
    DimensionValue::Absolute(4)
}

impl PuzzleDifficulty {
    /// Preset for `level`.
    pub fn preset(level: DifficultyLevel) -> Self {
        match level {
            DifficultyLevel::Easy => Self {
                circuit_length: DimensionValue::Relative(0.4),
                rotated_qubits: DimensionValue::Absolute(0),
                second_rotations: zero(),
                randomization_degree: default_degree(),
                bonus_edits: DimensionValue::Relative(0.4),
            },
            DifficultyLevel::Medium => Self {
                circuit_length: DimensionValue::Relative(0.6),
                rotated_qubits: DimensionValue::Relative(0.5),
                second_rotations: zero(),
                randomization_degree: default_degree(),
                bonus_edits: DimensionValue::Relative(0.2),
            },
            DifficultyLevel::Hard => Self {
                circuit_length: DimensionValue::Relative(0.8),
                rotated_qubits: DimensionValue::Relative(1.0),
                second_rotations: DimensionValue::Relative(0.5),
                randomization_degree: DimensionValue::Absolute(0),
                bonus_edits: zero(),
            },
        }
    }

    /// A profile placing exactly `circuit_length` gates on an unrotated input.
    pub fn with_length(circuit_length: usize) -> Self {
        Self {
            circuit_length: DimensionValue::Absolute(circuit_length),
            ..Self::preset(DifficultyLevel::Easy)
        }
    }

    fn value(&self, dimension: DifficultyDimension) -> DimensionValue {
        match dimension {
            DifficultyDimension::CircuitLength => self.circuit_length,
            DifficultyDimension::RotatedQubits => self.rotated_qubits,
            DifficultyDimension::SecondRotations => self.second_rotations,
            DifficultyDimension::RandomizationDegree => self.randomization_degree,
            DifficultyDimension::BonusEdits => self.bonus_edits,
        }
    }
}

impl Default for PuzzleDifficulty {
    fn default() -> Self {
        Self::preset(DifficultyLevel::Medium)
    }
}

impl DifficultyProfile for PuzzleDifficulty {
    fn absolute_value(
        &self,
        dimension: DifficultyDimension,
        num_qubits: usize,
        circuit_space: usize,
    ) -> usize {
        self.value(dimension)
            .resolve(dimension.relative_base(num_qubits, circuit_space))
    }
}

impl FromStr for DifficultyLevel {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(DifficultyLevel::Easy),
            "medium" => Ok(DifficultyLevel::Medium),
            "hard" => Ok(DifficultyLevel::Hard),
            other => Err(GenError::InvalidConfig(format!(
                "unknown difficulty '{other}', expected easy, medium or hard"
            ))),
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Medium => "medium",
            DifficultyLevel::Hard => "hard",
        })
    }
}
