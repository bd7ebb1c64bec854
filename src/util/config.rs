//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.poetry-factory/config.toml` - User-wide defaults
//! - Project: `.poetry-factory/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the configuration directory, both under the home directory and
/// the project root.
pub const CONFIG_DIR: &str = ".poetry-factory";

/// Configuration file name.
pub const CONFIG_FILE: &str = "config.toml";

/// Tool configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings for `check`
    pub check: CheckConfig,
}

/// `[check]` settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CheckConfig {
    /// Run strict checks (default: true)
    pub strict: Option<bool>,

    /// Treat warnings as errors (default: false)
    pub warnings_as_errors: Option<bool>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.check.strict.is_some() {
            self.check.strict = other.check.strict;
        }
        if other.check.warnings_as_errors.is_some() {
            self.check.warnings_as_errors = other.check.warnings_as_errors;
        }
    }

    /// Whether `check` runs the strict checks.
    pub fn strict(&self) -> bool {
        self.check.strict.unwrap_or(true)
    }

    /// Whether `check` fails on warnings.
    pub fn warnings_as_errors(&self) -> bool {
        self.check.warnings_as_errors.unwrap_or(false)
    }
}

/// Load merged configuration from global and project paths.
///
/// Project config takes precedence over global config.
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::load_or_default(global_path);
    let project = Config::load_or_default(project_path);
    config.merge(project);
    config
}

/// Get the global config directory (`~/.poetry-factory`).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR))
}

/// Get the project config file path.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.check.strict.is_none());
        assert!(config.strict());
        assert!(!config.warnings_as_errors());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"
[check]
strict = false
warnings-as-errors = true
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert!(!config.strict());
        assert!(config.warnings_as_errors());
    }

    #[test]
    fn test_config_load_invalid() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "[check]\nstrict = \"sometimes\"\n").unwrap();

        assert!(Config::load(&path).is_err());
        assert_eq!(Config::load_or_default(&path), Config::default());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.check.strict = Some(false);
        base.check.warnings_as_errors = Some(true);

        let mut other = Config::default();
        other.check.strict = Some(true);

        base.merge(other);
        assert_eq!(base.check.strict, Some(true));
        assert_eq!(base.check.warnings_as_errors, Some(true));
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = project_config_path(tmp.path());
        std::fs::create_dir_all(project.parent().unwrap()).unwrap();

        std::fs::write(&global, "[check]\nstrict = false\nwarnings-as-errors = true\n").unwrap();
        std::fs::write(&project, "[check]\nstrict = true\n").unwrap();

        let config = load_config(&global, &project);
        assert!(config.strict());
        assert!(config.warnings_as_errors());
    }

    #[test]
    fn test_load_config_missing_files() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("nope.toml"), &tmp.path().join("nada.toml"));
        assert_eq!(config, Config::default());
    }
}
