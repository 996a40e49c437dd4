//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# stylecheck configuration

# Starting point for check options: "recommended" or "minimal"
preset = "recommended"

[checker]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/target/**",
    "**/build/**",
    "**/generated/**",
]

# File extensions to check
extensions = ["java"]

# Respect .gitignore files
respect_gitignore = true

# Columns a tab advances to
tab_width = 8

# Abort instead of reporting unparseable files
fail_on_parse_error = false

# Check configurations
# Each check can be enabled/disabled and have its severity overridden

[checks.parameter-name]
enabled = true
# severity = "warning"
format = "^[a-z][a-zA-Z0-9]*$"
# Least visible scope checked: public, protected, package, private, anoninner
# scope = "private"
# Scope that, with every more visible one, is skipped
# excludeScope = "public"
ignoreOverridden = false
"#;

/// Config file written by `init`.
pub const CONFIG_FILE: &str = "stylecheck.toml";

/// Runs the init command in the current directory.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure checks");
    println!("  2. Run: stylecheck check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }
    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}
