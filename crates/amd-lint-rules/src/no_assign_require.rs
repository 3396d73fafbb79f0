//! Rule to forbid overwriting the global `require`.
//!
//! # Rationale
//!
//! Rebinding `require` hides the loader from every module that runs later
//! and makes dependency resolution depend on script order.
//!
//! # Detected Patterns
//!
//! - `var require = ...` (also `let` and `const`)
//! - `require = ...`
//! - `window.require = ...`
//!
//! `foo.require = ...` is a plain property and is not reported.

use amd_lint_core::{
    walk_file, walk_node, ConfigError, FileContext, JsNode, NodeKind, Reporter, Rule, RuleConfig,
    Severity, SourceFile, Violation, Visit,
};

use crate::options::expect_no_options;

/// Rule code for no-assign-require.
pub const CODE: &str = "AMD003";

/// Rule name for no-assign-require.
pub const NAME: &str = "no-assign-require";

const MESSAGE: &str = "Invalid assignment to `require`.";

/// Forbids declaring or assigning `require`.
#[derive(Debug, Clone)]
pub struct NoAssignRequire {
    severity: Severity,
}

impl Default for NoAssignRequire {
    fn default() -> Self {
        Self::new()
    }
}

impl NoAssignRequire {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Creates the rule from its config section, which takes no options.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOptions`] if the section has any option
    /// besides `enabled` and `severity`.
    pub fn from_config(config: Option<&RuleConfig>) -> Result<Self, ConfigError> {
        expect_no_options(NAME, config)?;
        Ok(Self::new())
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for NoAssignRequire {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids assignment to `require` or `window.require`"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, file: &SourceFile) -> Vec<Violation> {
        let mut visitor = AssignRequireVisitor {
            reporter: Reporter::new(ctx, self),
        };
        walk_file(&mut visitor, file);
        visitor.reporter.into_violations()
    }
}

struct AssignRequireVisitor<'r> {
    reporter: Reporter<'r>,
}

impl<'a> Visit<'a> for AssignRequireVisitor<'_> {
    fn visit_variable_declarator(&mut self, node: JsNode<'a>) {
        if node.field("name").and_then(|n| n.identifier_name()) == Some("require") {
            self.reporter.report(node, MESSAGE);
        }
        walk_node(self, node);
    }

    fn visit_assignment_expression(&mut self, node: JsNode<'a>) {
        if node.field("left").is_some_and(is_global_require) {
            self.reporter.report(node, MESSAGE);
        }
        walk_node(self, node);
    }
}

/// `require` or `window.require`.
fn is_global_require(target: JsNode<'_>) -> bool {
    match target.kind() {
        NodeKind::Identifier => target.text() == "require",
        NodeKind::MemberExpression => {
            let object = target.field("object").and_then(|o| o.identifier_name());
            let property = target.field("property").map(|p| p.text());
            object == Some("window") && property == Some("require")
        }
        _ => false,
    }
}
