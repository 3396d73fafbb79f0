//! Report sink handed to rules.
//!
//! A [`Reporter`] turns `report(node, message)` calls into [`Violation`]s:
//! it anchors the location at the node, honours inline allow directives,
//! and records at most one violation per anchor node.
//!
//! An allow directive counts when it sits on (or directly above) either the
//! anchor's line or the first line of the statement containing the anchor,
//! so a directive above a multi-line `define(...)` covers its callback.

use std::collections::HashSet;

use tracing::debug;

use crate::context::FileContext;
use crate::rule::Rule;
use crate::syntax::JsNode;
use crate::types::{Label, Severity, Suggestion, Violation};
use crate::utils::allowance::check_allow_with_reason;

/// Collects violations for one rule over one file.
#[derive(Debug)]
pub struct Reporter<'a> {
    ctx: &'a FileContext<'a>,
    code: &'static str,
    name: &'static str,
    severity: Severity,
    requires_reason: bool,
    reported: HashSet<usize>,
    violations: Vec<Violation>,
}

impl<'a> Reporter<'a> {
    /// Creates a reporter for `rule` over the file described by `ctx`.
    #[must_use]
    pub fn new<R: Rule + ?Sized>(ctx: &'a FileContext<'a>, rule: &R) -> Self {
        Self {
            ctx,
            code: rule.code(),
            name: rule.name(),
            severity: rule.default_severity(),
            requires_reason: rule.requires_allow_reason(),
            reported: HashSet::new(),
            violations: Vec::new(),
        }
    }

    /// Reports `message` anchored at `node`.
    pub fn report(&mut self, node: JsNode<'_>, message: impl Into<String>) {
        self.push(node, message.into(), None);
    }

    /// Reports `message` anchored at `node`, with a secondary label on
    /// `label_node`.
    pub fn report_with_label(
        &mut self,
        node: JsNode<'_>,
        message: impl Into<String>,
        label_node: JsNode<'_>,
        label_message: impl Into<String>,
    ) {
        let label = Label::new(
            label_node.location(self.ctx.relative_path.clone()),
            label_message,
        );
        self.push(node, message.into(), Some(label));
    }

    fn push(&mut self, node: JsNode<'_>, message: String, label: Option<Label>) {
        if !self.reported.insert(node.id()) {
            return;
        }

        let location = node.location(self.ctx.relative_path.clone());

        let mut allow = check_allow_with_reason(self.ctx.content, location.line, self.name);
        let statement_line = node.statement_line();
        if !allow.is_allowed() && statement_line != location.line {
            allow = check_allow_with_reason(self.ctx.content, statement_line, self.name);
        }
        if allow.is_allowed() {
            debug!(
                rule = self.name,
                line = location.line,
                "violation suppressed by allow directive"
            );
            if self.requires_reason && allow.reason().is_none() {
                self.violations.push(
                    Violation::new(
                        self.code,
                        self.name,
                        Severity::Warning,
                        location,
                        format!("Allow directive for '{}' is missing required reason", self.name),
                    )
                    .with_suggestion(Suggestion::new(
                        "Add reason=\"...\" to explain why this exception is necessary",
                    ))
                    .with_locked_severity(),
                );
            }
            return;
        }

        let mut violation = Violation::new(self.code, self.name, self.severity, location, message);
        if let Some(label) = label {
            violation = violation.with_label(label);
        }
        self.violations.push(violation);
    }

    /// Consumes the reporter and returns the collected violations.
    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}
