//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - solvable quantum-circuit puzzles",
        style("Qrogue").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qrogue-state        Amplitude vectors and circuit matrices");
    println!("  qrogue-ir           Gate catalog, placed gates, circuit grid");
    println!("  qrogue-hal          Simulation backend abstraction");
    println!("  qrogue-adapter-sim  Local statevector simulator");
    println!("  qrogue-gen          Puzzle generation and reachability search");
    println!("  qrogue-cli          Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
