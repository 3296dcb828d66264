//! Per-phase random streams.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Independent seeds for the three generation phases.
///
/// All three are drawn from the parent seed before any phase consumes
/// randomness, so how much one phase draws never affects another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSeeds {
    /// Seed of the input-rotation phase.
    pub input: u64,
    /// Seed of the target-construction phase.
    pub target: u64,
    /// Seed of the reward draw.
    pub reward: u64,
}

impl PhaseSeeds {
    /// Derive the phase seeds from a parent seed.
    pub fn derive(seed: u64) -> Self {
        let mut parent = StdRng::seed_from_u64(seed);
        Self {
            input: parent.r#gen(),
            target: parent.r#gen(),
            reward: parent.r#gen(),
        }
    }

    /// Stream for the input phase.
    pub fn input_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.input)
    }

    /// Stream for the target phase.
    pub fn target_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.target)
    }

    /// Stream for the reward draw.
    pub fn reward_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.reward)
    }
}
