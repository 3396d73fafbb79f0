//! Shared output formatting for lint results.

use amd_lint_core::{LintResult, Severity, Violation, ViolationDiagnostic};
use anyhow::Result;
use miette::NamedSource;
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `root` is where violation paths are relative to; the pretty format reads
/// source snippets from there.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(result, true)),
        OutputFormat::Json => println!("{}", render_json(result)?),
        OutputFormat::Compact => print!("{}", render_compact(result)),
        OutputFormat::Pretty => print_pretty(result, root),
    }
    Ok(())
}

fn severity_indicator(severity: Severity) -> String {
    match severity {
        Severity::Error => "\x1b[31merror\x1b[0m".to_string(),
        Severity::Warning => "\x1b[33mwarning\x1b[0m".to_string(),
        Severity::Info => "\x1b[34minfo\x1b[0m".to_string(),
    }
}

/// Multi-line text report with a summary line.
pub fn render_text(result: &LintResult, color: bool) -> String {
    let mut out = String::new();
    for violation in &result.violations {
        let block = violation.format();
        if color {
            let plain = format!("  {}: ", violation.severity);
            let colored = format!("  {}: ", severity_indicator(violation.severity));
            out.push_str(&block.replacen(&plain, &colored, 1));
        } else {
            out.push_str(&block);
        }
        out.push('\n');
    }
    out.push_str(&summary_line(result, color));
    out
}

fn summary_line(result: &LintResult, color: bool) -> String {
    let (errors, warnings, infos) = result.count_by_severity();
    let summary = format!(
        "Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s)",
        result.files_checked
    );
    if !color {
        return format!("{summary}\n");
    }
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    format!("{summary_color}{summary}\x1b[0m\n")
}

/// Pretty-printed JSON of the whole result.
pub fn render_json(result: &LintResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// One line per violation.
pub fn render_compact(result: &LintResult) -> String {
    result
        .violations
        .iter()
        .map(|v| format!("{v}\n"))
        .collect()
}

fn print_pretty(result: &LintResult, root: &Path) {
    for violation in &result.violations {
        println!("{}", render_pretty(violation, root));
    }
    print!("{}", summary_line(result, true));
}

/// Graphical miette report for one violation, with a source snippet when
/// the file can be read.
fn render_pretty(violation: &Violation, root: &Path) -> String {
    let report = miette::Report::new(ViolationDiagnostic::from(violation));
    let path = root.join(&violation.location.file);
    match std::fs::read_to_string(&path) {
        Ok(content) => {
            let name = violation.location.file.display().to_string();
            let report = report.with_source_code(NamedSource::new(name, content));
            format!("{report:?}")
        }
        Err(e) => {
            tracing::debug!("No source for {}: {}", path.display(), e);
            format!("{violation}")
        }
    }
}
