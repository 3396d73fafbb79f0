//! Rule presets for common configurations.

use crate::{amd_function_arity, no_assign_require, no_named_define};
use crate::{AmdFunctionArity, NoAssignRequire, NoNamedDefine};
use amd_lint_core::RuleBox;

/// Preset configurations for amd-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Every built-in rule.
    Recommended,
    /// Callback arity only, for gradual adoption.
    Minimal,
}

impl Preset {
    /// All presets, in documentation order.
    pub const ALL: [Self; 2] = [Self::Recommended, Self::Minimal];

    /// Looks up a preset by its config name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::Recommended),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }

    /// The config name of this preset.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Minimal => "minimal",
        }
    }

    /// Names of the rules in this preset.
    #[must_use]
    pub fn rule_names(self) -> &'static [&'static str] {
        match self {
            Self::Recommended => &[
                amd_function_arity::NAME,
                no_named_define::NAME,
                no_assign_require::NAME,
            ],
            Self::Minimal => &[amd_function_arity::NAME],
        }
    }

    /// Returns the rules for this preset with default options.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Minimal => minimal_rules(),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `amd-function-arity` (AMD001)
/// - `no-named-define` (AMD002)
/// - `no-assign-require` (AMD003)
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    all_rules()
}

/// Returns the minimal set of rules: `amd-function-arity` only.
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![Box::new(AmdFunctionArity::new())]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(AmdFunctionArity::new()),
        Box::new(NoNamedDefine::new()),
        Box::new(NoAssignRequire::new()),
    ]
}
