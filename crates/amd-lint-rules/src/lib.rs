//! # amd-lint-rules
//!
//! Built-in lint rules for amd-lint.
//!
//! This crate provides lint rules for AMD (`define`/`require`) and
//! CommonJS-wrapped JavaScript modules.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | AMD001 | `amd-function-arity` | Callback parameters must match the dependency list |
//! | AMD002 | `no-named-define` | Forbids `define("id", ...)` |
//! | AMD003 | `no-assign-require` | Forbids rebinding `require` or `window.require` |
//!
//! ## Usage
//!
//! ```ignore
//! use amd_lint_core::Analyzer;
//! use amd_lint_rules::{AmdFunctionArity, ExtraDependencies, NoNamedDefine};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./public/js")
//!     .rule(AmdFunctionArity::new().allow_extra_dependencies(ExtraDependencies::Allowed))
//!     .rule(NoNamedDefine::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod amd_function_arity;
mod arity;
mod call_shape;
mod dependencies;
pub mod no_assign_require;
pub mod no_named_define;
mod options;
mod presets;
mod registry;

pub use amd_function_arity::{AmdFunctionArity, ArityOptions};
pub use arity::{ArityVerdict, ExtraDependencies};
pub use call_shape::{classify, CallShape, Loader, ModuleCall};
pub use dependencies::DependencyResolution;
pub use no_assign_require::NoAssignRequire;
pub use no_named_define::NoNamedDefine;
pub use presets::{all_rules, minimal_rules, recommended_rules, Preset};
pub use registry::{preset_from_config, rules_by_name, rules_from_config};

/// Re-export core types for convenience.
pub use amd_lint_core::{Rule, Severity, Violation};
