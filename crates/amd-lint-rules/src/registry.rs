//! Building configured rule sets.

use amd_lint_core::{Config, ConfigError, RuleBox};
use tracing::{debug, warn};

use crate::presets::Preset;
use crate::{amd_function_arity, no_assign_require, no_named_define};
use crate::{AmdFunctionArity, NoAssignRequire, NoNamedDefine};

/// Resolves the preset named in `config`, defaulting to recommended.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] for an unknown preset name.
pub fn preset_from_config(config: &Config) -> Result<Preset, ConfigError> {
    match config.preset.as_deref() {
        None => Ok(Preset::Recommended),
        Some(name) => Preset::from_name(name)
            .ok_or_else(|| ConfigError::Validation(format!("unknown preset '{name}'"))),
    }
}

/// Builds the configured preset's rules with options decoded from `config`.
///
/// # Errors
///
/// Returns an error for an unknown preset or malformed rule options.
pub fn rules_from_config(config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    let preset = preset_from_config(config)?;
    debug!("Using preset: {}", preset.name());
    rules_by_name(preset.rule_names(), config)
}

/// Builds the named rules (by name or code) with options from `config`.
///
/// Unknown names are logged and skipped.
///
/// # Errors
///
/// Returns an error if a selected rule has malformed options.
pub fn rules_by_name<S: AsRef<str>>(
    names: &[S],
    config: &Config,
) -> Result<Vec<RuleBox>, ConfigError> {
    let mut rules = Vec::new();
    for name in names {
        let name = name.as_ref();
        match build_rule(name, config)? {
            Some(rule) => rules.push(rule),
            None => warn!("Unknown rule: {name}"),
        }
    }
    Ok(rules)
}

fn build_rule(name: &str, config: &Config) -> Result<Option<RuleBox>, ConfigError> {
    let rule: RuleBox = match name {
        amd_function_arity::NAME | amd_function_arity::CODE => Box::new(
            AmdFunctionArity::from_config(config.rule(amd_function_arity::NAME))?,
        ),
        no_named_define::NAME | no_named_define::CODE => Box::new(
            NoNamedDefine::from_config(config.rule(no_named_define::NAME))?,
        ),
        no_assign_require::NAME | no_assign_require::CODE => Box::new(
            NoAssignRequire::from_config(config.rule(no_assign_require::NAME))?,
        ),
        _ => return Ok(None),
    };
    Ok(Some(rule))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn default_preset_is_recommended() {
        let rules = rules_from_config(&Config::default()).unwrap();
        assert_eq!(
            names(&rules),
            vec!["amd-function-arity", "no-named-define", "no-assign-require"]
        );
    }

    #[test]
    fn minimal_preset() {
        let config = Config::parse("preset = \"minimal\"").unwrap();
        assert_eq!(names(&rules_from_config(&config).unwrap()), vec!["amd-function-arity"]);
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let config = Config::parse("preset = \"strict\"").unwrap();
        assert!(matches!(
            rules_from_config(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn selects_by_name_or_code_and_skips_unknown() {
        let selected = ["AMD002", "no-assign-require", "no-such-rule"];
        let rules = rules_by_name(&selected, &Config::default()).unwrap();
        assert_eq!(names(&rules), vec!["no-named-define", "no-assign-require"]);
    }

    #[test]
    fn invalid_options_surface_from_builder() {
        let config =
            Config::parse("[rules.amd-function-arity]\nallowExtraDependencies = \"yes\"").unwrap();
        assert!(matches!(
            rules_from_config(&config),
            Err(ConfigError::InvalidOptions { .. })
        ));
    }

    #[test]
    fn rules_without_options_reject_option_keys() {
        for toml in [
            "[rules.no-named-define]\nfoo = 1",
            "[rules.no-assign-require]\nallowExtraDependencies = true",
        ] {
            let config = Config::parse(toml).unwrap();
            assert!(
                matches!(
                    rules_from_config(&config),
                    Err(ConfigError::InvalidOptions { .. })
                ),
                "{toml}"
            );
        }

        let config = Config::parse("[rules.no-named-define]\nseverity = \"warning\"").unwrap();
        assert_eq!(rules_from_config(&config).unwrap().len(), 3);
    }

    #[test]
    fn options_of_unselected_rules_are_not_decoded() {
        let config =
            Config::parse("[rules.amd-function-arity]\nallowExtraDependencies = \"yes\"").unwrap();
        let rules = rules_by_name(&["no-named-define"], &config).unwrap();
        assert_eq!(rules.len(), 1);
    }
}
