//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::syntax::SourceFile;
use crate::types::{Severity, Violation};

/// A per-file lint rule over a parsed JavaScript syntax tree.
///
/// Rules receive the parsed file and usually drive a [`crate::Visit`]
/// implementation over it, reporting through a [`crate::Reporter`].
///
/// # Example
///
/// ```ignore
/// use amd_lint_core::{walk_file, FileContext, JsNode, Reporter, Rule, SourceFile, Violation, Visit};
///
/// pub struct NoEval;
///
/// impl Rule for NoEval {
///     fn name(&self) -> &'static str { "no-eval" }
///     fn code(&self) -> &'static str { "X001" }
///
///     fn check(&self, ctx: &FileContext, file: &SourceFile) -> Vec<Violation> {
///         let mut visitor = EvalVisitor { reporter: Reporter::new(ctx, self) };
///         walk_file(&mut visitor, file);
///         visitor.reporter.into_violations()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "amd-function-arity").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "AMD001").
    fn code(&self) -> &'static str;

    /// One-line summary shown by `list-rules`.
    fn description(&self) -> &'static str {
        ""
    }

    /// Severity used unless the config overrides it.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether `amd-lint: allow(...)` for this rule needs `reason="..."`.
    ///
    /// Error-level rules need one unless they say otherwise.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Runs the rule over one parsed file.
    fn check(&self, ctx: &FileContext, file: &SourceFile) -> Vec<Violation>;
}

/// A rule behind a box, as the analyzer and registry hold them.
pub type RuleBox = Box<dyn Rule>;
