//! Init command implementation.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "amd-lint.toml";

const DEFAULT_CONFIG: &str = r#"# amd-lint configuration

# Rule preset: "recommended" (all rules) or "minimal" (callback arity only)
preset = "recommended"

# Lowest severity that makes `amd-lint check` exit non-zero
fail_on = "error"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
]

# File extensions treated as JavaScript
extensions = ["js", "mjs", "cjs"]

# Respect .gitignore files
respect_gitignore = true

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.amd-function-arity]
enabled = true
# severity = "warning"  # Override default severity
# Trailing dependencies that may go without a callback parameter.
# `true` allows any, `false` allows none.
allowExtraDependencies = false
# allowExtraDependencies = ["css!app/style", "domReady!"]

[rules.no-named-define]
enabled = true

[rules.no-assign-require]
enabled = true
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let path = write_config(Path::new("."), force)?;

    println!("Created {}", path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE_NAME} to configure rules");
    println!("  2. Run: amd-lint check");

    Ok(())
}

/// Writes the default config into `dir`, returning its path.
fn write_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    Ok(config_path)
}
