//! List rules command implementation.

use amd_lint_rules::{all_rules, Preset};
use std::fmt::Write as _;

/// Runs the list-rules command.
pub fn run() {
    print!("{}", render());
}

fn render() -> String {
    let mut out = String::from("Available rules:\n\n");
    let _ = writeln!(
        out,
        "{:<8} {:<22} {:<22} Description",
        "Code", "Name", "Presets"
    );
    let _ = writeln!(out, "{}", "-".repeat(90));

    for rule in all_rules() {
        let presets: Vec<&str> = Preset::ALL
            .iter()
            .filter(|p| p.rule_names().iter().any(|n| *n == rule.name()))
            .map(|p| p.name())
            .collect();
        let _ = writeln!(
            out,
            "{:<8} {:<22} {:<22} {}",
            rule.code(),
            rule.name(),
            presets.join(", "),
            rule.description()
        );
    }

    out.push_str("\nPresets:\n");
    for preset in Preset::ALL {
        let _ = writeln!(
            out,
            "  {:<12} - {}",
            preset.name(),
            preset.rule_names().join(", ")
        );
    }

    out.push_str("\nUse --rules to filter specific rules, e.g.:\n");
    out.push_str("  amd-lint check --rules amd-function-arity,no-named-define\n");
    out.push_str("  amd-lint check --rules AMD001,AMD003\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_rule_with_presets() {
        let out = render();
        for rule in all_rules() {
            assert!(out.contains(rule.code()), "missing {}", rule.code());
        }
        let arity = out.lines().find(|l| l.starts_with("AMD001")).unwrap();
        assert!(arity.contains("recommended, minimal"));
        let named = out.lines().find(|l| l.starts_with("AMD002")).unwrap();
        assert!(named.contains("recommended"));
        assert!(!named.contains("minimal"));
    }
}
