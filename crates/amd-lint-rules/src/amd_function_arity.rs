//! Rule to keep AMD callback parameters in step with their dependencies.
//!
//! # Rationale
//!
//! The loader passes resolved modules to the callback positionally. A
//! parameter with no matching dependency is always `undefined`, and a
//! dependency with no parameter is loaded for nothing (or only for its side
//! effects, which is worth saying explicitly).
//!
//! # Detected Patterns
//!
//! - `define(deps, callback)` and `define("id", deps, callback)`
//! - `require(deps, callback[, errback])` and the same for `requirejs`
//! - `require("a", callback)` counts as a single dependency
//!
//! Dependency lists that are not literal (`define(deps, ...)`,
//! `require(list.concat(x), ...)`, spreads) are skipped.
//!
//! # Configuration
//!
//! - `allowExtraDependencies`: `true` to accept any surplus of dependencies
//!   over parameters, or a list of module names that may appear unbound at
//!   the end of the dependency list.
//!
//! # Suppression
//!
//! - `// amd-lint: allow(amd-function-arity) reason="..."` comment

use amd_lint_core::{
    walk_file, walk_node, ConfigError, FileContext, JsNode, Reporter, Rule, RuleConfig, Severity,
    SourceFile, Violation, Visit,
};
use serde::Deserialize;
use tracing::debug;

use crate::arity::{ArityVerdict, ExtraDependencies};
use crate::call_shape::classify;
use crate::dependencies::DependencyResolution;

/// Rule code for amd-function-arity.
pub const CODE: &str = "AMD001";

/// Rule name for amd-function-arity.
pub const NAME: &str = "amd-function-arity";

/// Options read from `[rules.amd-function-arity]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArityOptions {
    /// Tolerance for dependencies without a matching parameter.
    #[serde(
        default,
        rename = "allowExtraDependencies",
        alias = "allow_extra_dependencies"
    )]
    pub allow_extra_dependencies: ExtraDependencies,
}

/// Checks callback parameter counts against dependency lists.
#[derive(Debug, Clone)]
pub struct AmdFunctionArity {
    options: ArityOptions,
    severity: Severity,
}

impl Default for AmdFunctionArity {
    fn default() -> Self {
        Self::new()
    }
}

impl AmdFunctionArity {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: ArityOptions::default(),
            severity: Severity::Error,
        }
    }

    /// Creates the rule from its config section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOptions`] if the options are malformed.
    pub fn from_config(config: Option<&RuleConfig>) -> Result<Self, ConfigError> {
        let options = match config {
            Some(c) => c.options_as::<ArityOptions>(NAME)?,
            None => ArityOptions::default(),
        };
        Ok(Self::new().with_options(options))
    }

    /// Replaces all options.
    #[must_use]
    pub fn with_options(mut self, options: ArityOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the policy for surplus dependencies.
    #[must_use]
    pub fn allow_extra_dependencies(mut self, policy: ExtraDependencies) -> Self {
        self.options.allow_extra_dependencies = policy;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns the active options.
    #[must_use]
    pub fn options(&self) -> &ArityOptions {
        &self.options
    }
}

impl Rule for AmdFunctionArity {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Ensures AMD callbacks declare one parameter per dependency"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, file: &SourceFile) -> Vec<Violation> {
        let mut visitor = ArityVisitor {
            policy: &self.options.allow_extra_dependencies,
            reporter: Reporter::new(ctx, self),
        };
        walk_file(&mut visitor, file);
        visitor.reporter.into_violations()
    }
}

struct ArityVisitor<'r> {
    policy: &'r ExtraDependencies,
    reporter: Reporter<'r>,
}

impl ArityVisitor<'_> {
    fn check_call(&mut self, node: JsNode<'_>) {
        let Some(shape) = classify(node) else {
            return;
        };
        let call = shape.call();

        let DependencyResolution::Known(names) = DependencyResolution::resolve(call.dependencies)
        else {
            debug!(
                line = node.start_line(),
                loader = shape.loader().name(),
                "skipping call with indeterminate dependency list"
            );
            return;
        };

        let verdict = ArityVerdict::judge(&names, call.callback.param_count(), self.policy);
        if let Some(message) = verdict.message() {
            self.reporter.report_with_label(
                call.callback,
                message,
                call.dependencies,
                declared_label(names.len()),
            );
        }
    }
}

impl<'a> Visit<'a> for ArityVisitor<'_> {
    fn visit_call_expression(&mut self, node: JsNode<'a>) {
        self.check_call(node);
        walk_node(self, node);
    }
}

fn declared_label(count: usize) -> String {
    if count == 1 {
        "1 dependency declared here".to_string()
    } else {
        format!("{count} dependencies declared here")
    }
}
