//! `amd-lint: allow(...)` comments.
//!
//! Supports line and block comments, on the checked line or the line
//! directly above it. [`crate::Reporter`] checks both the anchor's line and
//! the start line of its enclosing statement:
//! ```text
//! // amd-lint: allow(amd-function-arity) reason="legacy loader plugin"
//! define(["a", "b"], function (a) {}); /* amd-lint: allow(all) */
//! ```

use std::collections::HashSet;

const DIRECTIVE_PREFIX: &str = "amd-lint:";

/// Result of checking for an allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// A directive covers the rule.
    Allowed {
        /// Text of `reason="..."`, when given.
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// True when a directive covers the rule.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// The directive's reason, if it gave one.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// One parsed `allow(...)` comment.
#[derive(Debug, Clone)]
pub struct AllowDirective {
    /// Rule names listed inside `allow(...)`; `all` covers every rule.
    pub rules: HashSet<String>,
    /// Text of `reason="..."`.
    pub reason: Option<String>,
}

/// Checks source code for an allowance comment covering `line`.
///
/// `line` is 1-indexed; the line above it is checked as well.
#[must_use]
pub fn check_allow_with_reason(content: &str, line: usize, rule_name: &str) -> AllowCheck {
    let lines: Vec<&str> = content.lines().collect();

    for check_line in [line.saturating_sub(1), line] {
        if check_line == 0 || check_line > lines.len() {
            continue;
        }

        if let Some(directive) = parse_allow_directive(lines[check_line - 1]) {
            if directive.rules.contains(rule_name) || directive.rules.contains("all") {
                return AllowCheck::Allowed {
                    reason: directive.reason,
                };
            }
        }
    }

    AllowCheck::Denied
}

/// Parses an allowance directive from a line containing a JS comment.
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    let start = line.find(DIRECTIVE_PREFIX)?;
    let opener = line[..start].trim_end();
    if !(opener.ends_with("//") || opener.ends_with("/*") || opener.ends_with("/**")) {
        return None;
    }

    let directive = line[start + DIRECTIVE_PREFIX.len()..].trim();
    let directive = directive.strip_suffix("*/").unwrap_or(directive).trim_end();
    let allow_content = directive.strip_prefix("allow(")?.trim();

    let paren_end = allow_content.find(')')?;
    let rules: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest
        .strip_prefix("reason=")
        .map(str::trim)
        .and_then(|r| r.strip_prefix('"'))
        .and_then(|r| r.find('"').map(|end| r[..end].to_string()));

    Some(AllowDirective { rules, reason })
}
