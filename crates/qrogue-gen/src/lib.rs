//! Qrogue Puzzle Generation
//!
//! Builds quantum-circuit puzzles that are solvable by construction: an
//! input state prepared by random rotations, a target state reached by
//! applying gates from a pool on top of it, and a reward.
//!
//! # Pipeline
//!
//! ```text
//!   seed ──→ PhaseSeeds ──┬─ input  ──→ rotation gates ──→ input state
//!                         ├─ target ──→ nearsighted / farsighted ──→ target state
//!                         └─ reward ──→ RewardPool::draw
//! ```
//!
//! Each phase owns its random stream, so a puzzle depends only on its
//! seed, size, difficulty, gate pool and [`GeneratorConfig`].
//!
//! # Strategies
//!
//! | `force_num_of_gates` | Strategy | Rejects a candidate when |
//! |---|---|---|
//! | `false` | nearsighted | its state was already seen on the way |
//! | `true` | farsighted | it yields the zero state or undoes the latest gate on a qubit |
//!
//! Both strategies retry with a fresh stream when too few gates were placed,
//! and report a [`Shortfall`] instead of failing.
//!
//! # Verification
//!
//! [`ReachabilitySearch`] checks independently that a gate multiset can map
//! the input onto the target and returns a witness circuit.

mod construct;
mod farsighted;
mod nearsighted;

pub mod config;
pub mod difficulty;
pub mod error;
pub mod generator;
pub mod reachability;
pub mod reward;
pub mod rotation;
pub mod seeds;

pub use config::{DEFAULT_MAX_RETRIES, GeneratorConfig, Strategy};
pub use construct::ordered_assignments;
pub use difficulty::{
    DifficultyDimension, DifficultyLevel, DifficultyProfile, DimensionValue, PuzzleDifficulty,
    ResolvedDifficulty,
};
pub use error::{GenError, GenResult};
pub use generator::{Puzzle, PuzzleGenerator, Shortfall, TargetCircuit};
pub use reachability::{ReachabilitySearch, SearchOrder, Witness};
pub use reward::{RewardPool, WeightedPool};
pub use seeds::PhaseSeeds;
