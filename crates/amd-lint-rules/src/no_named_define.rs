//! Rule to forbid the named module form of `define`.
//!
//! # Rationale
//!
//! Module ids are assigned by the optimizer from the file path. A hand
//! written id ties the module to one location and breaks when the file is
//! moved or loaded under a different path mapping.
//!
//! # Detected Patterns
//!
//! - `define("id", {...})`
//! - `define("id", function () {...})`
//! - `define("id", ["dep"], function (dep) {...})`

use amd_lint_core::{
    walk_file, walk_node, ConfigError, FileContext, JsNode, NodeKind, Reporter, Rule, RuleConfig,
    Severity, SourceFile, Violation, Visit,
};

use crate::options::expect_no_options;

/// Rule code for no-named-define.
pub const CODE: &str = "AMD002";

/// Rule name for no-named-define.
pub const NAME: &str = "no-named-define";

const MESSAGE: &str = "Named module form of `define` is not allowed";

/// Forbids `define` calls that name their module.
#[derive(Debug, Clone)]
pub struct NoNamedDefine {
    severity: Severity,
}

impl Default for NoNamedDefine {
    fn default() -> Self {
        Self::new()
    }
}

impl NoNamedDefine {
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

impl Rule for NoNamedDefine {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids the named module form of `define`"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, file: &SourceFile) -> Vec<Violation> {
        let mut visitor = NamedDefineVisitor {
            reporter: Reporter::new(ctx, self),
        };
        walk_file(&mut visitor, file);
        visitor.reporter.into_violations()
    }
}

struct NamedDefineVisitor<'r> {
    reporter: Reporter<'r>,
}

impl<'a> Visit<'a> for NamedDefineVisitor<'_> {
    fn visit_call_expression(&mut self, node: JsNode<'a>) {
        if is_named_define(node) {
            self.reporter.report(node, MESSAGE);
        }
        walk_node(self, node);
    }
}

fn is_named_define(call: JsNode<'_>) -> bool {
    if call.callee_name() != Some("define") {
        return false;
    }
    let args = call.arguments();
    args.len() >= 2 && args[0].kind() == NodeKind::StringLiteral
}
