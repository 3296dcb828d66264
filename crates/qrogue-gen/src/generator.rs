//! Puzzle generation.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use qrogue_hal::{CircuitRunner, SimulationBackend};
use qrogue_ir::{GateKind, GateType, PlacedGate};
use qrogue_state::AmplitudeVector;

use crate::config::{GeneratorConfig, Strategy};
use crate::construct::{Attempt, Construction};
use crate::difficulty::{DifficultyProfile, ResolvedDifficulty};
use crate::error::{GenError, GenResult};
use crate::reward::RewardPool;
use crate::rotation;
use crate::seeds::PhaseSeeds;
use crate::{farsighted, nearsighted};

/// Fewer target gates were placed than selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    /// Gates selected from the pool.
    pub requested: usize,
    /// Gates actually placed.
    pub placed: usize,
}

/// Outcome of [`PuzzleGenerator::prepare_from_gates`].
#[derive(Debug, Clone)]
pub struct TargetCircuit {
    /// Placed gates in application order.
    pub gates: Vec<PlacedGate>,
    /// State after the input gates and `gates`.
    pub vector: AmplitudeVector,
    /// Construction attempts made.
    pub attempts: usize,
    /// Set when not every selected gate was placed.
    pub shortfall: Option<Shortfall>,
}

/// A generated puzzle.
///
/// `target_gates` applied after `input_gates` turns |0…0⟩ into `target`,
/// which makes the puzzle solvable by construction.
#[derive(Debug, Clone, Serialize)]
pub struct Puzzle<T> {
    /// Parent seed.
    pub seed: u64,
    /// Qubit count.
    pub num_qubits: usize,
    /// Available gate columns.
    pub circuit_space: usize,
    /// State the player starts from.
    pub input: AmplitudeVector,
    /// State the player must reach.
    pub target: AmplitudeVector,
    /// Rotations producing `input` from |0…0⟩.
    pub input_gates: Vec<PlacedGate>,
    /// One solution, in application order.
    pub target_gates: Vec<PlacedGate>,
    /// Reward for solving.
    pub reward: T,
    /// Extra edits granted to the player.
    pub bonus_edits: usize,
    /// Set when the solution is shorter than requested.
    pub shortfall: Option<Shortfall>,
}

impl<T> Puzzle<T> {
    /// Whether every selected gate made it into the solution.
    pub fn is_complete(&self) -> bool {
        self.shortfall.is_none()
    }

    /// Gate kinds of the solution, as handed to the player.
    pub fn target_gate_kinds(&self) -> Vec<GateKind> {
        self.target_gates.iter().map(|g| g.kind().clone()).collect()
    }
}

/// Builds puzzles for a fixed qubit count, circuit space and gate pool.
///
/// # Example
///
/// ```rust
/// use qrogue_adapter_sim::StatevectorBackend;
/// use qrogue_gen::{PuzzleDifficulty, PuzzleGenerator};
/// use qrogue_ir::GateKind;
///
/// let backend = StatevectorBackend::new();
/// let generator = PuzzleGenerator::new(
///     &backend,
///     2,
///     5,
///     PuzzleDifficulty::with_length(3),
///     vec![GateKind::H, GateKind::X, GateKind::CX],
///     (),
/// )
/// .unwrap();
///
/// let puzzle = generator.generate_puzzle(42).unwrap();
/// assert!(puzzle.target_gates.len() <= 3);
/// ```
pub struct PuzzleGenerator<'b, B, D, P>
where
    B: SimulationBackend,
    D: DifficultyProfile,
    P: RewardPool,
{
    backend: &'b B,
    num_qubits: usize,
    circuit_space: usize,
    difficulty: D,
    gate_pool: Vec<GateKind>,
    rewards: P,
    config: GeneratorConfig,
}

impl<'b, B, D, P> PuzzleGenerator<'b, B, D, P>
where
    B: SimulationBackend,
    D: DifficultyProfile,
    P: RewardPool,
{
    /// Create a generator with the default [`GeneratorConfig`].
    pub fn new(
        backend: &'b B,
        num_qubits: usize,
        circuit_space: usize,
        difficulty: D,
        gate_pool: Vec<GateKind>,
        rewards: P,
    ) -> GenResult<Self> {
        if num_qubits == 0 {
            return Err(GenError::InvalidConfig("puzzle needs at least one qubit".into()));
        }
        if circuit_space == 0 {
            return Err(GenError::InvalidConfig(
                "circuit space must be at least one column".into(),
            ));
        }
        if gate_pool.is_empty() {
            return Err(GenError::EmptyGatePool);
        }
        for gate in &gate_pool {
            if gate.gate_type() == GateType::Combined {
                return Err(GenError::InvalidConfig(format!(
                    "combined gate '{}' cannot be part of a gate pool",
                    gate.name()
                )));
            }
            let arity = gate.num_qubits();
            if arity as usize > num_qubits {
                return Err(GenError::ArityMismatch {
                    gate: gate.name().to_string(),
                    arity,
                    num_qubits,
                });
            }
        }
        Ok(Self {
            backend,
            num_qubits,
            circuit_space,
            difficulty,
            gate_pool,
            rewards,
            config: GeneratorConfig::default(),
        })
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: GeneratorConfig) -> GenResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Qubit count.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Gate columns available.
    pub fn circuit_space(&self) -> usize {
        self.circuit_space
    }

    /// Gate pool.
    pub fn gate_pool(&self) -> &[GateKind] {
        &self.gate_pool
    }

    /// Active configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Difficulty resolved for this generator's size.
    pub fn difficulty(&self) -> ResolvedDifficulty {
        self.difficulty.resolve(self.num_qubits, self.circuit_space)
    }

    fn runner(&self) -> CircuitRunner<'b, B> {
        CircuitRunner::new(self.backend, self.num_qubits)
            .with_tolerance(self.config.validation_tolerance)
    }

    /// Rotation gates for a puzzle's input state.
    pub fn prepare_rotation_gates<R: Rng + ?Sized>(&self, rng: &mut R) -> GenResult<Vec<PlacedGate>> {
        rotation::prepare_rotation_gates(rng, self.num_qubits, &self.difficulty())
    }

    /// `count` gates drawn from the pool with replacement.
    pub fn select_gates<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<GateKind> {
        (0..count)
            .filter_map(|_| self.gate_pool.choose(rng).cloned())
            .collect()
    }

    /// Build the target circuit on top of `input_gates`.
    ///
    /// `input` must be the state `input_gates` produce. Each attempt draws
    /// a fresh stream from `rng`; attempts repeat up to `max_retries` times
    /// while too few gates were placed, and the attempt with the most
    /// placed gates wins.
    pub fn prepare_from_gates<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        input_gates: &[PlacedGate],
        input: &AmplitudeVector,
    ) -> GenResult<TargetCircuit> {
        let requested = self.difficulty().circuit_length;
        let strategy = self.config.strategy();
        let runner = self.runner();
        let ctx = Construction {
            runner: &runner,
            input_gates,
            circuit_space: self.circuit_space,
            comparison: self.config.comparison,
        };

        let mut best = self.attempt(&ctx, rng, strategy, requested, input)?;
        let mut attempts = 1;
        while attempts <= self.config.max_retries && !sufficient(strategy, best.gates.len(), requested) {
            debug!(attempt = attempts, placed = best.gates.len(), requested, "retrying construction");
            let next = self.attempt(&ctx, rng, strategy, requested, input)?;
            attempts += 1;
            if next.gates.len() > best.gates.len() {
                best = next;
            }
        }

        let placed = best.gates.len();
        let shortfall = (placed < requested).then_some(Shortfall { requested, placed });
        if shortfall.is_some() {
            warn!(requested, placed, attempts, "target circuit is shorter than requested");
        }
        Ok(TargetCircuit {
            gates: best.gates,
            vector: best.vector,
            attempts,
            shortfall,
        })
    }

    fn attempt<R: Rng + ?Sized>(
        &self,
        ctx: &Construction<'_, 'b, B>,
        rng: &mut R,
        strategy: Strategy,
        requested: usize,
        input: &AmplitudeVector,
    ) -> GenResult<Attempt> {
        let mut stream = StdRng::seed_from_u64(rng.r#gen());
        let selected = self.select_gates(&mut stream, requested);
        match strategy {
            Strategy::Nearsighted => nearsighted::build(ctx, &mut stream, &selected, input),
            Strategy::Farsighted => farsighted::build(ctx, &mut stream, &selected, input),
        }
    }

    /// Generate the puzzle for `seed`.
    ///
    /// The same seed, size, difficulty, pool and configuration always give
    /// the same puzzle.
    #[instrument(skip(self), fields(num_qubits = self.num_qubits, circuit_space = self.circuit_space))]
    pub fn generate_puzzle(&self, seed: u64) -> GenResult<Puzzle<P::Reward>> {
        let seeds = PhaseSeeds::derive(seed);
        let difficulty = self.difficulty();

        let input_gates = self.prepare_rotation_gates(&mut seeds.input_rng())?;
        let input = self.runner().run_vector(&input_gates)?;
        let target = self.prepare_from_gates(&mut seeds.target_rng(), &input_gates, &input)?;
        let reward = self.rewards.draw(&mut seeds.reward_rng());

        info!(
            input_gates = input_gates.len(),
            target_gates = target.gates.len(),
            attempts = target.attempts,
            "generated puzzle"
        );
        Ok(Puzzle {
            seed,
            num_qubits: self.num_qubits,
            circuit_space: self.circuit_space,
            input,
            target: target.vector,
            input_gates,
            target_gates: target.gates,
            reward,
            bonus_edits: difficulty.bonus_edits,
            shortfall: target.shortfall,
        })
    }
}

/// Whether an attempt placed enough gates to stop retrying.
fn sufficient(strategy: Strategy, placed: usize, requested: usize) -> bool {
    match strategy {
        Strategy::Nearsighted => placed > 0 || requested == 0,
        Strategy::Farsighted => 2 * placed >= requested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sufficient() {
        assert!(!sufficient(Strategy::Nearsighted, 0, 3));
        assert!(sufficient(Strategy::Nearsighted, 1, 3));
        assert!(sufficient(Strategy::Nearsighted, 0, 0));
        assert!(!sufficient(Strategy::Farsighted, 1, 3));
        assert!(sufficient(Strategy::Farsighted, 2, 3));
        assert!(sufficient(Strategy::Farsighted, 2, 4));
    }
}
