//! Generate command implementation.

use std::fs;

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use qrogue_adapter_sim::StatevectorBackend;
use qrogue_gen::Puzzle;

use super::common::{PuzzleArgs, build_generator, print_puzzle, resolve_config};

/// Execute the generate command.
pub fn execute(args: &PuzzleArgs, count: u64, format: &str, output: Option<&str>) -> Result<()> {
    let json = match format.to_lowercase().as_str() {
        "text" => false,
        "json" => true,
        other => anyhow::bail!("Unknown format: '{other}'. Available: text, json"),
    };
    if count == 0 {
        anyhow::bail!("Count must be at least 1");
    }

    let config = resolve_config(args)?;
    let backend = StatevectorBackend::new();
    let generator = build_generator(&backend, &config)?;
    let first_seed = args.seed.unwrap_or(0);

    info!(
        num_qubits = config.num_qubits,
        circuit_space = config.circuit_space,
        count,
        "generating puzzles"
    );

    let progress = (count > 1).then(|| {
        let bar = ProgressBar::new(count);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=> "),
        );
        bar
    });

    let mut puzzles: Vec<Puzzle<String>> = Vec::with_capacity(count as usize);
    for offset in 0..count {
        let seed = first_seed.wrapping_add(offset);
        let puzzle = generator
            .generate_puzzle(seed)
            .with_context(|| format!("Failed to generate puzzle for seed {seed}"))?;
        if let Some(bar) = &progress {
            bar.set_message(format!("seed {seed}"));
            bar.inc(1);
        }
        puzzles.push(puzzle);
    }
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    let shortfalls = puzzles.iter().filter(|p| !p.is_complete()).count();

    if json {
        let rendered = if puzzles.len() == 1 {
            serde_json::to_string_pretty(&puzzles[0])?
        } else {
            serde_json::to_string_pretty(&puzzles)?
        };
        match output {
            Some(path) => {
                fs::write(path, rendered).with_context(|| format!("Failed to write {path}"))?;
                println!(
                    "{} Wrote {} puzzle(s) to {}",
                    style("✓").green().bold(),
                    puzzles.len(),
                    style(path).green()
                );
            }
            None => println!("{rendered}"),
        }
    } else {
        if output.is_some() {
            anyhow::bail!("--output requires --format json");
        }
        for puzzle in &puzzles {
            print_puzzle(puzzle);
            println!();
        }
    }

    if shortfalls > 0 {
        eprintln!(
            "{} {} of {} puzzle(s) are shorter than requested",
            style("!").yellow().bold(),
            shortfalls,
            puzzles.len()
        );
    }

    Ok(())
}
