//! Global context for command execution.
//!
//! Provides centralized access to the working directory, output settings and
//! configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::errors::ManifestError;
use crate::core::project::find_manifest;
use crate::util::config::{self, Config, CONFIG_DIR, CONFIG_FILE};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global data (~/.poetry-factory/)
    home: PathBuf,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext rooted at the process working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::from_parts(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    ///
    /// Relative paths are resolved against the process working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let cwd = std::path::absolute(&cwd)
            .with_context(|| format!("failed to resolve directory: {}", cwd.display()))?;
        Ok(Self::from_parts(cwd))
    }

    fn from_parts(cwd: PathBuf) -> Self {
        let home = config::global_config_dir().unwrap_or_else(|| PathBuf::from(CONFIG_DIR));

        GlobalContext {
            cwd,
            home,
            color: true,
        }
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join(CONFIG_FILE)
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Find pyproject.toml starting from cwd and searching upward.
    pub fn find_manifest(&self) -> Result<PathBuf, ManifestError> {
        find_manifest(&self.cwd)
    }

    /// Load the global configuration merged with the project's, if any.
    pub fn load_config(&self, project_root: &Path) -> Config {
        config::load_config(
            &self.config_path(),
            &config::project_config_path(project_root),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::MANIFEST_NAME;
    use tempfile::TempDir;

    #[test]
    fn test_context_paths() {
        let ctx = GlobalContext::new().unwrap();
        assert!(ctx.cwd().is_absolute());
        assert!(ctx.config_path().ends_with(".poetry-factory/config.toml"));
        assert!(ctx.color());
    }

    #[test]
    fn test_find_manifest() {
        let tmp = TempDir::new().unwrap();
        let manifest = tmp.path().join(MANIFEST_NAME);
        std::fs::write(&manifest, "[tool.poetry]\nname = \"test\"\n").unwrap();

        let nested = tmp.path().join("docs");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = GlobalContext::with_cwd(nested).unwrap();
        assert_eq!(ctx.find_manifest().ok(), Some(manifest));
    }

    #[test]
    fn test_project_config_overrides() {
        let tmp = TempDir::new().unwrap();
        let project_config = config::project_config_path(tmp.path());
        std::fs::create_dir_all(project_config.parent().unwrap()).unwrap();
        std::fs::write(&project_config, "[check]\nwarnings-as-errors = true\n").unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).unwrap();
        let config = ctx.load_config(tmp.path());
        assert!(config.warnings_as_errors());
    }
}
