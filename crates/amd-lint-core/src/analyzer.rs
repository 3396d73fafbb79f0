//! Core analyzer for orchestrating lint execution.

use crate::config::{Config, RuleConfig, DEFAULT_EXCLUDES};
use crate::context::FileContext;
use crate::rule::{Rule, RuleBox};
use crate::syntax::SourceFile;
use crate::types::{LintResult, Violation};

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a JavaScript source file.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Directory walk error.
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds an include glob pattern, matched against root-relative paths.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved or a
    /// glob pattern is invalid.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());
        if exclude_patterns.is_empty() {
            exclude_patterns.extend(DEFAULT_EXCLUDES.iter().map(ToString::to_string));
        }

        let mut include_patterns = self.include_patterns;
        include_patterns.extend(config.analyzer.include.iter().cloned());

        let excludes = compile(&exclude_patterns)?;
        let includes = compile(&include_patterns)?;

        Ok(Analyzer {
            root,
            rules: self.rules,
            exclude_patterns,
            excludes,
            includes,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

fn compile(patterns: &[String]) -> Result<Vec<glob::Pattern>, AnalyzerError> {
    patterns
        .iter()
        .map(|p| glob::Pattern::new(p).map_err(AnalyzerError::from))
        .collect()
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    excludes: Vec<glob::Pattern>,
    includes: Vec<glob::Pattern>,
    config: Config,
    fail_on_parse_error: bool,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("root", &self.root)
            .field("rules", &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>())
            .field("exclude_patterns", &self.exclude_patterns)
            .finish_non_exhaustive()
    }
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyzes all files under the root and returns the results.
    ///
    /// Files that fail to parse are skipped with a warning unless
    /// [`AnalyzerBuilder::fail_on_parse_error`] was set.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            match self.analyze_file(file_path) {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(AnalyzerError::Parse { path, message }) => {
                    warn!("Failed to parse {}: {}", path.display(), message);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, message });
                    }
                }
                Err(e) => return Err(e),
            }
        }

        result.sort_violations();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Analyzes in-memory source as if it were the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Parse`] if `content` is not valid JavaScript.
    pub fn analyze_source(
        &self,
        path: &Path,
        content: &str,
    ) -> Result<Vec<Violation>, AnalyzerError> {
        let file = SourceFile::parse(content).map_err(|e| AnalyzerError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let ctx = FileContext::new(path, content, &self.root);
        let mut violations = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_violations = rule.check(&ctx, &file);
            let rule_violations = self.apply_severity_override(rule.name(), rule_violations);
            violations.extend(rule_violations);
        }

        Ok(violations)
    }

    fn analyze_file(&self, path: &Path) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());
        let bytes = std::fs::read(path)?;
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                warn!("{} is not valid UTF-8, decoding lossily", path.display());
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        self.analyze_source(path, &content)
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in violations.iter_mut().filter(|v| !v.severity_locked) {
                v.severity = severity;
            }
        }
        violations
    }

    /// Discovers all JavaScript source files to analyze.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let respect_gitignore = self.config.analyzer.respect_gitignore;

        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(respect_gitignore)
            .git_exclude(respect_gitignore)
            .git_global(respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !entry.file_type().is_some_and(|t| t.is_file()) || !self.has_known_extension(path) {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            if !self.is_included(path) {
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn has_known_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.config.analyzer.extensions.iter().any(|x| x == ext))
    }

    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    /// Checks if a path should be excluded.
    ///
    /// Globs only see the root-relative path, so a root that itself lives
    /// under `dist/` or `node_modules/` is still linted.
    fn should_exclude(&self, path: &Path) -> bool {
        let rel_str = self.relative(path).to_string_lossy();
        self.excludes.iter().any(|p| p.matches(&rel_str))
    }

    fn is_included(&self, path: &Path) -> bool {
        if self.includes.is_empty() {
            return true;
        }
        let rel_str = self.relative(path).to_string_lossy();
        self.includes.iter().any(|p| p.matches(&rel_str))
    }

    /// Gets the rule configuration for a specific rule.
    #[must_use]
    pub fn rule_config(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.config.rule(rule_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerConfig;
    use crate::report::Reporter;
    use crate::types::Severity;
    use crate::visit::{walk_file, walk_node, Visit};
    use crate::JsNode;
    use std::fs;

    /// Flags every call to `eval`.
    struct NoEval;

    struct EvalVisitor<'a> {
        reporter: Reporter<'a>,
    }

    impl<'a> Visit<'a> for EvalVisitor<'_> {
        fn visit_call_expression(&mut self, node: JsNode<'a>) {
            if node.callee_name() == Some("eval") {
                self.reporter.report(node, "eval is not allowed");
            }
            walk_node(self, node);
        }
    }

    impl Rule for NoEval {
        fn name(&self) -> &'static str {
            "no-eval"
        }
        fn code(&self) -> &'static str {
            "T001"
        }
        fn check(&self, ctx: &FileContext, file: &SourceFile) -> Vec<Violation> {
            let mut visitor = EvalVisitor {
                reporter: Reporter::new(ctx, self),
            };
            walk_file(&mut visitor, file);
            visitor.reporter.into_violations()
        }
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn builder_resolves_relative_root() {
        let analyzer = Analyzer::builder().root(".").build().unwrap();
        assert!(analyzer.root().is_absolute());
    }

    #[test]
    fn builder_applies_default_excludes() {
        let analyzer = Analyzer::builder().root("/app").build().unwrap();
        assert!(analyzer.should_exclude(Path::new("/app/node_modules/x/index.js")));
        assert!(analyzer.should_exclude(Path::new("/app/lib/node_modules/x/index.js")));
        assert!(analyzer.should_exclude(Path::new("/app/dist/bundle.js")));
        assert!(!analyzer.should_exclude(Path::new("/app/src/main.js")));
    }

    #[test]
    fn excludes_ignore_directories_above_the_root() {
        let analyzer = Analyzer::builder().root("/srv/dist/app").build().unwrap();
        assert!(!analyzer.should_exclude(Path::new("/srv/dist/app/main.js")));
        assert!(analyzer.should_exclude(Path::new("/srv/dist/app/dist/bundle.js")));

        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("dist/app");
        write(&root, "main.js", "eval('x');");
        let result = Analyzer::builder()
            .root(&root)
            .rule(NoEval)
            .build()
            .unwrap()
            .analyze()
            .unwrap();
        assert_eq!(result.files_checked, 1);
        assert_eq!(result.violations.len(), 1);
    }

    #[test]
    fn explicit_excludes_replace_defaults() {
        let analyzer = Analyzer::builder()
            .root("/app")
            .exclude("**/vendor/**")
            .build()
            .unwrap();
        assert!(analyzer.should_exclude(Path::new("/app/vendor/require.js")));
        assert!(!analyzer.should_exclude(Path::new("/app/dist/bundle.js")));
    }

    #[test]
    fn invalid_glob_is_rejected() {
        let err = Analyzer::builder().root("/app").exclude("[").build().unwrap_err();
        assert!(matches!(err, AnalyzerError::Glob(_)));
    }

    #[test]
    fn analyze_source_runs_rules_with_overrides() {
        let mut config = Config::default();
        config.rules.insert(
            "no-eval".to_string(),
            RuleConfig {
                severity: Some(Severity::Warning),
                ..RuleConfig::default()
            },
        );

        let analyzer = Analyzer::builder()
            .root("/app")
            .rule(NoEval)
            .config(config)
            .build()
            .unwrap();

        let violations = analyzer
            .analyze_source(Path::new("/app/src/a.js"), "eval('1');\nfoo(eval('2'));")
            .unwrap();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert_eq!(violations[1].location.line, 2);
        assert_eq!(violations[0].location.file, PathBuf::from("src/a.js"));
    }

    #[test]
    fn override_keeps_missing_reason_warning() {
        let mut config = Config::default();
        config.rules.insert(
            "no-eval".to_string(),
            RuleConfig {
                severity: Some(Severity::Error),
                ..RuleConfig::default()
            },
        );
        let analyzer = Analyzer::builder()
            .root("/app")
            .rule(NoEval)
            .config(config)
            .build()
            .unwrap();

        let violations = analyzer
            .analyze_source(
                Path::new("/app/a.js"),
                "// amd-lint: allow(no-eval)\neval('1');\neval('2');",
            )
            .unwrap();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert!(violations[0].message.contains("missing required reason"));
        assert_eq!(violations[1].severity, Severity::Error);
    }

    #[test]
    fn non_utf8_files_are_decoded_lossily() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.js", "eval('a');");
        fs::write(dir.path().join("latin1.js"), b"var s = '\xe9t\xe9';\neval(s);\n").unwrap();

        let result = Analyzer::builder()
            .root(dir.path())
            .rule(NoEval)
            .build()
            .unwrap()
            .analyze()
            .unwrap();
        assert_eq!(result.files_checked, 2);
        assert_eq!(result.violations.len(), 2);
        assert_eq!(result.violations[1].location.file, PathBuf::from("latin1.js"));
        assert_eq!(result.violations[1].location.line, 2);
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let mut config = Config::default();
        config.rules.insert(
            "no-eval".to_string(),
            RuleConfig {
                enabled: Some(false),
                ..RuleConfig::default()
            },
        );
        let analyzer = Analyzer::builder()
            .root("/app")
            .rule(NoEval)
            .config(config)
            .build()
            .unwrap();
        let violations = analyzer
            .analyze_source(Path::new("/app/a.js"), "eval('x');")
            .unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn analyze_walks_tree_and_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "src/a.js", "eval('a');");
        write(dir.path(), "src/b.mjs", "ok();");
        write(dir.path(), "src/notes.txt", "eval('txt');");
        write(dir.path(), "node_modules/dep/index.js", "eval('dep');");
        write(dir.path(), "src/broken.js", "eval(");

        let analyzer = Analyzer::builder()
            .root(dir.path())
            .rule(NoEval)
            .build()
            .unwrap();
        let result = analyzer.analyze().unwrap();

        assert_eq!(result.files_checked, 2);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].location.file, PathBuf::from("src/a.js"));
    }

    #[test]
    fn fail_on_parse_error_aborts() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "broken.js", "define([");

        let err = Analyzer::builder()
            .root(dir.path())
            .rule(NoEval)
            .fail_on_parse_error(true)
            .build()
            .unwrap()
            .analyze()
            .unwrap_err();
        assert!(matches!(err, AnalyzerError::Parse { .. }));
    }

    #[test]
    fn gitignore_and_includes_filter_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), ".gitignore", "generated/\n");
        write(dir.path(), "generated/out.js", "eval('gen');");
        write(dir.path(), "app/main.js", "eval('main');");
        write(dir.path(), "test/spec.js", "eval('spec');");

        let config = Config {
            analyzer: AnalyzerConfig {
                include: vec!["app/**".to_string()],
                ..AnalyzerConfig::default()
            },
            ..Config::default()
        };
        let analyzer = Analyzer::builder()
            .root(dir.path())
            .rule(NoEval)
            .config(config)
            .build()
            .unwrap();
        let result = analyzer.analyze().unwrap();
        assert_eq!(result.files_checked, 1);
        assert_eq!(result.violations[0].location.file, PathBuf::from("app/main.js"));

        let unfiltered = Analyzer::builder()
            .root(dir.path())
            .rule(NoEval)
            .config(Config {
                analyzer: AnalyzerConfig {
                    respect_gitignore: false,
                    ..AnalyzerConfig::default()
                },
                ..Config::default()
            })
            .build()
            .unwrap()
            .analyze()
            .unwrap();
        assert_eq!(unfiltered.files_checked, 3);
    }
}
