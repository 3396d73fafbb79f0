//! `amd-lint`: checks AMD and CommonJS module definitions in JavaScript.
//!
//! ```bash
//! amd-lint check public/js --format pretty
//! amd-lint list-rules
//! amd-lint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Lints AMD `define`/`require` calls and CommonJS wrappers
#[derive(Parser)]
#[command(name = "amd-lint", version, about)]
struct Cli {
    /// Log at debug level unless `RUST_LOG` says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of looking one up
    #[arg(short, long, global = true, env = "AMD_LINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lint JavaScript files under a directory
    Check {
        /// Project directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// How to print violations
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Comma-separated rule names or codes to run instead of the preset
        #[arg(long, value_name = "RULES")]
        rules: Option<String>,

        /// Extra glob to skip; repeatable
        #[arg(short, long, value_name = "GLOB")]
        exclude: Vec<String>,
    },

    /// Print the built-in rules and presets
    ListRules,

    /// Write a starter amd-lint.toml in the current directory
    Init {
        /// Replace an existing amd-lint.toml
        #[arg(long)]
        force: bool,
    },
}

/// How `check` prints its results.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored multi-line report.
    #[default]
    Text,
    /// The whole result as JSON.
    Json,
    /// `file:line:col: severity [code] message` per violation.
    Compact,
    /// Source snippets with highlighted spans.
    Pretty,
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // stdout carries the report; logs stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let failed = match cli.command {
        Command::Check {
            path,
            format,
            rules,
            exclude,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            commands::check::run(&path, format, rules, exclude, &source)?
        }
        Command::ListRules => {
            commands::list_rules::run();
            false
        }
        Command::Init { force } => {
            commands::init::run(force)?;
            false
        }
    };

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
