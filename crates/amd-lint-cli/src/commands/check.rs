//! Check command implementation.

use amd_lint_core::Analyzer;
use amd_lint_rules::{rules_by_name, rules_from_config};
use anyhow::{Context, Result};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
///
/// Returns `true` when a violation at or above the configured `fail_on`
/// severity was reported.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<bool> {
    let config = source.load()?;
    let threshold = config.fail_threshold();

    let rules = match rules_filter {
        Some(filter) => {
            let names: Vec<&str> = filter
                .split(',')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .collect();
            rules_by_name(&names, &config)
        }
        None => rules_from_config(&config),
    }
    .context("Failed to configure rules")?;

    let mut builder = Analyzer::builder().root(path).config(config);
    for pattern in exclude {
        builder = builder.exclude(pattern);
    }
    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules",
        path.display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format, analyzer.root())?;

    Ok(result.has_violations_at(threshold))
}
