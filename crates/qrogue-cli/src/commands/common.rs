//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use serde::{Deserialize, Serialize};

use qrogue_adapter_sim::StatevectorBackend;
use qrogue_gen::{
    DifficultyLevel, GeneratorConfig, Puzzle, PuzzleDifficulty, PuzzleGenerator, WeightedPool,
};
use qrogue_ir::{GateKind, PlacedGate};

/// Puzzle selection shared by `generate` and `verify`.
#[derive(Args, Debug, Clone)]
pub struct PuzzleArgs {
    /// Parent seed
    #[arg(short, long, env = "QROGUE_SEED")]
    pub seed: Option<u64>,

    /// YAML configuration file
    #[arg(short, long, env = "QROGUE_CONFIG")]
    pub config: Option<String>,

    /// Number of qubits
    #[arg(short, long)]
    pub qubits: Option<usize>,

    /// Number of gate columns
    #[arg(long)]
    pub space: Option<usize>,

    /// Difficulty preset (easy, medium, hard)
    #[arg(short, long)]
    pub difficulty: Option<String>,

    /// Comma-separated gate pool, e.g. "H,X,CX,RY(1.57)"
    #[arg(short, long, value_delimiter = ',')]
    pub gates: Vec<String>,

    /// Use the farsighted strategy
    #[arg(long)]
    pub farsighted: bool,
}

/// Difficulty as written in a config file: a preset name or explicit values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DifficultySetting {
    /// `difficulty: hard`
    Level(String),
    /// `difficulty: { circuit_length: 4, rotated_qubits: 0.5 }`
    Custom(PuzzleDifficulty),
}

impl DifficultySetting {
    /// The profile this setting describes.
    pub fn profile(&self) -> Result<PuzzleDifficulty> {
        match self {
            DifficultySetting::Level(name) => {
                let level: DifficultyLevel = name.parse()?;
                Ok(PuzzleDifficulty::preset(level))
            }
            DifficultySetting::Custom(difficulty) => Ok(*difficulty),
        }
    }
}

/// One reward pool entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardEntry {
    /// Reward name.
    pub name: String,
    /// Relative weight.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// Contents of a `--config` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Number of qubits.
    #[serde(default = "default_num_qubits")]
    pub num_qubits: usize,

    /// Number of gate columns.
    #[serde(default = "default_circuit_space")]
    pub circuit_space: usize,

    /// Gate pool, by name.
    #[serde(default = "default_gates")]
    pub gates: Vec<String>,

    /// Difficulty preset or explicit values.
    #[serde(default = "default_difficulty")]
    pub difficulty: DifficultySetting,

    /// Generator settings.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Reward pool.
    #[serde(default = "default_rewards")]
    pub rewards: Vec<RewardEntry>,
}

fn default_num_qubits() -> usize {
    2
}

fn default_circuit_space() -> usize {
    5
}

fn default_gates() -> Vec<String> {
    ["H", "X", "CX", "S", "Y"].map(String::from).to_vec()
}

fn default_difficulty() -> DifficultySetting {
    DifficultySetting::Level(DifficultyLevel::Medium.to_string())
}

fn default_rewards() -> Vec<RewardEntry> {
    [("coins", 3.0), ("key", 1.0), ("heart", 1.0)]
        .into_iter()
        .map(|(name, weight)| RewardEntry {
            name: name.to_string(),
            weight,
        })
        .collect()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            num_qubits: default_num_qubits(),
            circuit_space: default_circuit_space(),
            gates: default_gates(),
            difficulty: default_difficulty(),
            generator: GeneratorConfig::default(),
            rewards: default_rewards(),
        }
    }
}

impl CliConfig {
    /// Parse a YAML config.
    pub fn from_yaml(source: &str) -> Result<Self> {
        serde_yaml_ng::from_str(source).context("Invalid configuration")
    }

    /// Load a YAML config file.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("File not found: {path}");
        }
        let source =
            fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
        Self::from_yaml(&source).with_context(|| format!("Failed to load config: {path}"))
    }

    /// Apply command-line overrides.
    pub fn merge_args(mut self, args: &PuzzleArgs) -> Self {
        if let Some(qubits) = args.qubits {
            self.num_qubits = qubits;
        }
        if let Some(space) = args.space {
            self.circuit_space = space;
        }
        if let Some(level) = &args.difficulty {
            self.difficulty = DifficultySetting::Level(level.clone());
        }
        if !args.gates.is_empty() {
            self.gates = args.gates.clone();
        }
        if args.farsighted {
            self.generator.force_num_of_gates = true;
        }
        self
    }

    /// Parse the gate pool.
    pub fn gate_pool(&self) -> Result<Vec<GateKind>> {
        self.gates
            .iter()
            .map(|name| {
                name.parse::<GateKind>()
                    .with_context(|| format!("Invalid gate in pool: '{name}'"))
            })
            .collect()
    }

    /// Build the reward pool.
    pub fn reward_pool(&self) -> Result<WeightedPool<String>> {
        Ok(WeightedPool::new(
            self.rewards.iter().map(|r| (r.name.clone(), r.weight)),
        )?)
    }
}

/// Resolve the configuration from `--config` and the other flags.
pub fn resolve_config(args: &PuzzleArgs) -> Result<CliConfig> {
    let config = match &args.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    Ok(config.merge_args(args))
}

/// Puzzle generator over the local simulator.
pub type CliGenerator<'b> =
    PuzzleGenerator<'b, StatevectorBackend, PuzzleDifficulty, WeightedPool<String>>;

/// Build a generator from a resolved configuration.
pub fn build_generator<'b>(
    backend: &'b StatevectorBackend,
    config: &CliConfig,
) -> Result<CliGenerator<'b>> {
    let generator = PuzzleGenerator::new(
        backend,
        config.num_qubits,
        config.circuit_space,
        config.difficulty.profile()?,
        config.gate_pool()?,
        config.reward_pool()?,
    )?
    .with_config(config.generator.clone())?;
    Ok(generator)
}

/// Render a gate list as `H[q0] CX[q0,q1]`.
pub fn format_gates(gates: &[PlacedGate]) -> String {
    if gates.is_empty() {
        return "(none)".to_string();
    }
    gates
        .iter()
        .map(|g| {
            let qargs: Vec<String> = g.qargs().iter().map(ToString::to_string).collect();
            format!("{}[{}]", g.kind(), qargs.join(","))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print a puzzle in human-readable form.
pub fn print_puzzle(puzzle: &Puzzle<String>) {
    println!(
        "{} Puzzle {} ({} qubits, {} columns)",
        style("→").cyan().bold(),
        style(puzzle.seed).yellow(),
        puzzle.num_qubits,
        puzzle.circuit_space
    );
    println!("  Input gates:  {}", format_gates(&puzzle.input_gates));
    println!("  Solution:     {}", format_gates(&puzzle.target_gates));
    println!("  Reward:       {}", style(&puzzle.reward).green());
    println!("  Bonus edits:  {}", puzzle.bonus_edits);
    if let Some(shortfall) = puzzle.shortfall {
        println!(
            "  {} placed {} of {} requested gates",
            style("Shortfall:").yellow().bold(),
            shortfall.placed,
            shortfall.requested
        );
    }
    println!();
    println!("  {}", style("Input state").bold());
    for line in puzzle.input.to_string().lines() {
        println!("    {line}");
    }
    println!("  {}", style("Target state").bold());
    for line in puzzle.target.to_string().lines() {
        println!("    {line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> PuzzleArgs {
        PuzzleArgs {
            seed: None,
            config: None,
            qubits: None,
            space: None,
            difficulty: None,
            gates: Vec::new(),
            farsighted: false,
        }
    }

    #[test]
    fn test_default_config_builds() {
        let backend = StatevectorBackend::new();
        let config = CliConfig::default();
        let generator = build_generator(&backend, &config).unwrap();
        assert_eq!(generator.num_qubits(), 2);
        assert_eq!(generator.gate_pool().len(), 5);
    }

    #[test]
    fn test_yaml_config() {
        let yaml = r#"
num_qubits: 3
circuit_space: 6
gates: [H, cnot, "ry(1.57)"]
difficulty:
  circuit_length: 4
  rotated_qubits: 0.5
generator:
  force_num_of_gates: true
rewards:
  - name: key
"#;
        let config = CliConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.num_qubits, 3);
        assert_eq!(config.gate_pool().unwrap()[1], GateKind::CX);
        assert!(matches!(config.difficulty, DifficultySetting::Custom(_)));
        assert!(config.generator.force_num_of_gates);
        assert_eq!(config.rewards[0].weight, 1.0);
    }

    #[test]
    fn test_preset_difficulty() {
        let config = CliConfig::from_yaml("difficulty: hard").unwrap();
        assert_eq!(
            config.difficulty.profile().unwrap(),
            PuzzleDifficulty::preset(DifficultyLevel::Hard)
        );
        let config = CliConfig::from_yaml("difficulty: impossible").unwrap();
        assert!(config.difficulty.profile().is_err());
    }

    #[test]
    fn test_args_override_config() {
        let mut overrides = args();
        overrides.qubits = Some(4);
        overrides.gates = vec!["X".into(), "SWAP".into()];
        overrides.farsighted = true;
        let config = CliConfig::default().merge_args(&overrides);
        assert_eq!(config.num_qubits, 4);
        assert_eq!(config.circuit_space, 5);
        assert_eq!(config.gate_pool().unwrap(), vec![GateKind::X, GateKind::Swap]);
        assert!(config.generator.force_num_of_gates);
    }

    #[test]
    fn test_invalid_gate_name() {
        let mut overrides = args();
        overrides.gates = vec!["teleport".into()];
        let config = CliConfig::default().merge_args(&overrides);
        assert!(config.gate_pool().is_err());
    }

    #[test]
    fn test_format_gates() {
        let gates = vec![
            PlacedGate::bound(GateKind::H, [qrogue_ir::QubitId(0)]).unwrap(),
            PlacedGate::bound(GateKind::CX, [qrogue_ir::QubitId(0), qrogue_ir::QubitId(1)]).unwrap(),
        ];
        assert_eq!(format_gates(&gates), "H[q0] CX[q0,q1]");
        assert_eq!(format_gates(&[]), "(none)");
    }
}
