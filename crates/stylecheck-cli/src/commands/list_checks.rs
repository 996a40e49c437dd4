//! List checks command implementation.

use anyhow::Result;
use stylecheck_checks::{available_checks, Preset};

/// Runs the list-checks command.
pub fn run() -> Result<()> {
    println!("Available checks:\n");
    println!("{:<8} {:<18} {:<9} Description", "Code", "Name", "Severity");
    println!("{}", "-".repeat(80));

    for check in available_checks()? {
        let tokens: Vec<&str> = check.acceptable_tokens.iter().map(|t| t.name()).collect();
        println!(
            "{:<8} {:<18} {:<9} {} (tokens: {})",
            check.code,
            check.name,
            check.default_severity.to_string(),
            check.description,
            tokens.join(", ")
        );
    }

    println!("\nPresets:");
    for (preset, summary) in [
        (Preset::Recommended, "every check, default options (default)"),
        (Preset::Minimal, "public API only, overriding methods skipped"),
    ] {
        println!("  {:<12} - {}", preset.name(), summary);
    }

    println!("\nUse --checks to filter specific checks, e.g.:");
    println!("  stylecheck check --checks parameter-name");
    println!("  stylecheck check --checks SC101");
    Ok(())
}
