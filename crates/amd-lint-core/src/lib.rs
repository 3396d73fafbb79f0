//! # amd-lint-core
//!
//! Core framework for linting AMD and CommonJS module definitions in
//! JavaScript, built on a Tree-sitter syntax tree.
//!
//! This crate provides the foundational traits and types for building
//! module-definition linters. It includes:
//!
//! - [`SourceFile`] and [`JsNode`] for the parsed syntax tree
//! - [`Visit`] for document-order traversal
//! - [`Rule`] trait for per-file rules, and [`Reporter`] for emitting findings
//! - [`Analyzer`] for orchestrating lint execution
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use amd_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./public/js")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod report;
mod rule;
mod syntax;
mod types;
mod visit;

/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{
    AnalyzerConfig, Config, ConfigError, RuleConfig, DEFAULT_EXCLUDES, DEFAULT_EXTENSIONS,
};
pub use context::FileContext;
pub use report::Reporter;
pub use rule::{Rule, RuleBox};
pub use syntax::{JsNode, NodeKind, ParseError, SourceFile};
pub use types::{
    Label, LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic,
};
pub use utils::allowance::AllowCheck;
pub use visit::{walk_file, walk_node, Visit};
