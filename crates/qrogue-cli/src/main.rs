//! Qrogue Puzzle Command-Line Interface
//!
//! Generates and verifies quantum-circuit puzzles from the terminal.
//!
//! ```text
//!   ┌───┐     ┌───┐
//!  ─┤ H ├──●──┤ ? ├─   |00⟩  ──→  target
//!   └───┘  │  └───┘
//!  ───────(+)───────
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::PuzzleArgs;
use commands::{gates, generate, verify, version};

/// Qrogue - solvable quantum-circuit puzzles
#[derive(Parser)]
#[command(name = "qrogue-puzzle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one or more puzzles
    Generate {
        #[command(flatten)]
        puzzle: PuzzleArgs,

        /// Number of consecutive seeds to generate
        #[arg(short = 'n', long, default_value = "1")]
        count: u64,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Generate a puzzle and check it with an independent reachability search
    Verify {
        #[command(flatten)]
        puzzle: PuzzleArgs,

        /// Only try the solution gates in their generated order
        #[arg(long)]
        given_order: bool,

        /// Give up after evaluating this many circuits
        #[arg(long)]
        max_nodes: Option<usize>,
    },

    /// List the gate catalog
    Gates,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Generate {
            puzzle,
            count,
            format,
            output,
        } => generate::execute(&puzzle, count, &format, output.as_deref()),

        Commands::Verify {
            puzzle,
            given_order,
            max_nodes,
        } => verify::execute(&puzzle, given_order, max_nodes),

        Commands::Gates => {
            gates::execute();
            Ok(())
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
