//! Gates command implementation.

use console::style;

use qrogue_ir::GateType;

/// Execute the gates command.
pub fn execute() {
    println!("{}", style("Gate catalog:").bold());
    println!();

    for ty in GateType::ALL {
        let arity = ty
            .fixed_arity()
            .map_or_else(|| "n".to_string(), |n| n.to_string());
        let aliases = ty.aliases().join(", ");
        println!(
            "  {} {:<8} {} qubit(s)  {}",
            style("•").cyan(),
            style(ty.name()).green().bold(),
            arity,
            style(aliases).dim()
        );
        println!("             {}", ty.description());
    }

    println!();
    println!(
        "Rotations take an angle in radians, e.g. {}.",
        style("RY(1.5708)").yellow()
    );
}
