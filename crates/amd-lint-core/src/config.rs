//! Configuration types for amd-lint.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::types::Severity;

/// Exclude patterns applied when neither the builder nor the config names any.
pub const DEFAULT_EXCLUDES: &[&str] = &["**/node_modules/**", "**/dist/**"];

/// File extensions analyzed by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "mjs", "cjs"];

/// Top-level configuration for amd-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (e.g., "recommended", "minimal").
    #[serde(default)]
    pub preset: Option<String>,

    /// Severity threshold for a failing run (default: error).
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or names no file extension.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.analyzer.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "analyzer.extensions must name at least one file extension".to_string(),
            ));
        }
        Ok(())
    }

    /// Checks if a rule is enabled. Rules without a section are enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Gets the `[rules.<name>]` section, if present.
    #[must_use]
    pub fn rule(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }

    /// Returns the configured failure threshold, defaulting to errors.
    #[must_use]
    pub fn fail_threshold(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Error)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Glob patterns to include (if empty, every file with a known extension).
    #[serde(default)]
    pub include: Vec<String>,

    /// File extensions to analyze, without the leading dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: Vec::new(),
            include: Vec::new(),
            extensions: default_extensions(),
            respect_gitignore: true,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect()
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
///
/// Keys other than `enabled` and `severity` are rule options, decoded by
/// the rule itself through [`RuleConfig::options_as`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: toml::Table,
}

impl RuleConfig {
    /// Decodes the rule options into a typed options struct.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOptions`] naming `rule` when the
    /// options do not match `T`.
    pub fn options_as<T: DeserializeOwned>(&self, rule: &str) -> Result<T, ConfigError> {
        toml::Value::Table(self.options.clone())
            .try_into()
            .map_err(|e: toml::de::Error| ConfigError::InvalidOptions {
                rule: rule.to_string(),
                message: e.message().to_string(),
            })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A rule's options section does not match its schema.
    #[error("Invalid options for rule '{rule}': {message}")]
    InvalidOptions {
        /// Rule whose options were rejected.
        rule: String,
        /// Decoder message.
        message: String,
    },

    /// The configuration parsed but is not usable.
    #[error("Invalid config: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(deny_unknown_fields)]
    struct SampleOptions {
        #[serde(default)]
        limit: u32,
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(config.rules.is_empty());
        assert_eq!(config.analyzer.extensions, vec!["js", "mjs", "cjs"]);
        assert_eq!(config.fail_threshold(), Severity::Error);
    }

    #[test]
    fn parses_full_config() {
        let toml = r#"
preset = "minimal"
fail_on = "warning"

[analyzer]
root = "./public"
exclude = ["**/vendor/**"]
extensions = ["js"]

[rules.amd-function-arity]
severity = "warning"
allowExtraDependencies = ["require"]

[rules.no-named-define]
enabled = false
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.preset.as_deref(), Some("minimal"));
        assert_eq!(config.fail_threshold(), Severity::Warning);
        assert_eq!(config.analyzer.root, PathBuf::from("./public"));
        assert_eq!(config.analyzer.extensions, vec!["js"]);

        assert!(config.is_rule_enabled("amd-function-arity"));
        assert!(!config.is_rule_enabled("no-named-define"));
        assert!(config.is_rule_enabled("unlisted-rule"));
        assert_eq!(
            config.rule_severity("amd-function-arity"),
            Some(Severity::Warning)
        );

        let rule = config.rule("amd-function-arity").unwrap();
        assert!(rule.options.contains_key("allowExtraDependencies"));
        assert!(!rule.options.contains_key("severity"));
    }

    #[test]
    fn rejects_empty_extensions() {
        let err = Config::parse("[analyzer]\nextensions = []").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = Config::parse("preset = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn options_decode_into_typed_struct() {
        let config = Config::parse("[rules.sample]\nlimit = 3").unwrap();
        let options: SampleOptions = config.rule("sample").unwrap().options_as("sample").unwrap();
        assert_eq!(options, SampleOptions { limit: 3 });

        let empty = RuleConfig::default();
        let options: SampleOptions = empty.options_as("sample").unwrap();
        assert_eq!(options.limit, 0);
    }

    #[test]
    fn invalid_options_name_the_rule() {
        let config = Config::parse("[rules.sample]\nlimt = 3").unwrap();
        let err = config
            .rule("sample")
            .unwrap()
            .options_as::<SampleOptions>("sample")
            .unwrap_err();
        match err {
            ConfigError::InvalidOptions { rule, .. } => assert_eq!(rule, "sample"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
