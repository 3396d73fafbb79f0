//! Locating the `amd-lint.toml` to use for a run.
//!
//! First hit wins: the `--config` path, a project file (`amd-lint.toml`,
//! then `.amd-lint.toml`), the user-wide `config.toml` under
//! `$AMD_LINT_CONFIG_DIR` or `~/.amd-lint/`, and finally built-in defaults.

use amd_lint_core::Config;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File names looked up in the project directory, in order.
const PROJECT_FILES: [&str; 2] = ["amd-lint.toml", ".amd-lint.toml"];

/// File name looked up in the user config directory.
const USER_FILE: &str = "config.toml";

/// Which config a run uses and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config` or `AMD_LINT_CONFIG`.
    Explicit(PathBuf),
    /// Found next to the linted project.
    Project(PathBuf),
    /// Found in the user config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// The config file, unless defaults are used.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path) | Self::Project(path) | Self::Global(path) => Some(path),
            Self::Default => None,
        }
    }

    /// Reads and parses the config file, or returns defaults.
    ///
    /// # Errors
    ///
    /// Returns an error naming the file if it cannot be read or parsed.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            debug!("No config file, using defaults");
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            info!("Using user config {}", path.display());
        }
        Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Picks the config for a run over `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    locate(project_dir, explicit, user_config_dir().as_deref())
}

fn locate(project_dir: &Path, explicit: Option<&Path>, user_dir: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if let Some(path) = PROJECT_FILES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        debug!("Project config: {}", path.display());
        return ConfigSource::Project(path);
    }

    match user_dir.map(|dir| dir.join(USER_FILE)) {
        Some(path) if path.is_file() => {
            debug!("User config: {}", path.display());
            ConfigSource::Global(path)
        }
        _ => ConfigSource::Default,
    }
}

/// `$AMD_LINT_CONFIG_DIR`, else `~/.amd-lint`.
fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os("AMD_LINT_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|home| home.join(".amd-lint")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn explicit_path_wins_even_if_missing() {
        let project = TempDir::new().unwrap();
        touch(project.path(), "amd-lint.toml", "");
        let missing = project.path().join("nope.toml");

        let source = locate(project.path(), Some(&missing), None);
        assert_eq!(source, ConfigSource::Explicit(missing));

        let err = source.load().unwrap_err();
        assert!(format!("{err:#}").contains("nope.toml"));
    }

    #[test]
    fn plain_name_is_preferred_over_dotfile() {
        let project = TempDir::new().unwrap();
        let dotfile = touch(project.path(), ".amd-lint.toml", "");
        assert_eq!(
            locate(project.path(), None, None),
            ConfigSource::Project(dotfile)
        );

        let plain = touch(project.path(), "amd-lint.toml", "");
        assert_eq!(locate(project.path(), None, None), ConfigSource::Project(plain));
    }

    #[test]
    fn user_config_only_without_project_config() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        let user_file = touch(user.path(), "config.toml", "preset = \"minimal\"");

        let source = locate(project.path(), None, Some(user.path()));
        assert_eq!(source, ConfigSource::Global(user_file));
        assert_eq!(source.load().unwrap().preset.as_deref(), Some("minimal"));

        touch(project.path(), "amd-lint.toml", "");
        assert!(matches!(
            locate(project.path(), None, Some(user.path())),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn defaults_when_nothing_is_found() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();

        let source = locate(project.path(), None, Some(user.path()));
        assert_eq!(source, ConfigSource::Default);
        assert!(source.path().is_none());
        assert!(source.load().unwrap().rules.is_empty());
    }

    #[test]
    fn bad_project_config_names_the_file() {
        let project = TempDir::new().unwrap();
        touch(project.path(), "amd-lint.toml", "fail_on = \"fatal\"");

        let err = locate(project.path(), None, None).load().unwrap_err();
        assert!(err.to_string().contains("amd-lint.toml"));
    }
}
