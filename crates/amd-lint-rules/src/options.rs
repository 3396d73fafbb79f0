//! Option decoding shared by rules without options.

use amd_lint_core::{ConfigError, RuleConfig};
use serde::Deserialize;

/// Decodes only when the `[rules.<name>]` table holds no option keys.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NoOptions {}

/// Rejects any option key in `config`.
pub(crate) fn expect_no_options(
    rule: &str,
    config: Option<&RuleConfig>,
) -> Result<(), ConfigError> {
    if let Some(config) = config {
        config.options_as::<NoOptions>(rule)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use amd_lint_core::Config;

    #[test]
    fn enabled_and_severity_are_not_options() {
        let config =
            Config::parse("[rules.no-named-define]\nenabled = true\nseverity = \"warning\"")
                .unwrap();
        assert!(expect_no_options("no-named-define", config.rule("no-named-define")).is_ok());
        assert!(expect_no_options("no-named-define", None).is_ok());
    }

    #[test]
    fn any_option_key_is_rejected() {
        let config = Config::parse("[rules.no-named-define]\nfoo = 1").unwrap();
        let err = expect_no_options("no-named-define", config.rule("no-named-define")).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidOptions { ref rule, .. } if rule == "no-named-define")
        );
    }
}
