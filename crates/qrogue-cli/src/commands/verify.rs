//! Verify command implementation.

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use qrogue_adapter_sim::StatevectorBackend;
use qrogue_gen::{ReachabilitySearch, SearchOrder};
use qrogue_hal::CircuitRunner;

use super::common::{PuzzleArgs, build_generator, format_gates, print_puzzle, resolve_config};

/// Execute the verify command.
pub fn execute(args: &PuzzleArgs, given_order: bool, max_nodes: Option<usize>) -> Result<()> {
    let config = resolve_config(args)?;
    let backend = StatevectorBackend::new();
    let generator = build_generator(&backend, &config)?;
    let puzzle = generator.generate_puzzle(args.seed.unwrap_or(0))?;
    print_puzzle(&puzzle);
    println!();

    let order = if given_order {
        SearchOrder::GivenOrder
    } else {
        SearchOrder::AnyOrder
    };
    let mut search = ReachabilitySearch::new(&backend, puzzle.num_qubits)
        .with_comparison(config.generator.comparison)
        .with_order(order);
    if let Some(max) = max_nodes {
        search = search.with_max_nodes(max);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message("Searching for a solution...");
    let found = search.find(&puzzle.input, &puzzle.target, &puzzle.target_gate_kinds());
    spinner.finish_and_clear();

    let Some(witness) = found? else {
        anyhow::bail!(
            "No circuit over {} reaches the target",
            format_gates(&puzzle.target_gates)
        );
    };

    // replay from |0…0⟩ through the input rotations
    let replay = CircuitRunner::new(&backend, puzzle.num_qubits)
        .run_vector(puzzle.input_gates.iter().chain(&witness.gates))?;
    if !replay.is_equal_to(&puzzle.target, &config.generator.comparison, true)? {
        anyhow::bail!("Witness does not reproduce the target state");
    }

    println!(
        "{} Reachable with {}",
        style("✓").green().bold(),
        format_gates(&witness.gates)
    );
    Ok(())
}
