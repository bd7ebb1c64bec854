//! Test fixtures for common test scenarios.
//!
//! Provides `[tool.poetry]` sections and whole pyproject.toml documents used
//! across unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::manifest::{ManifestSection, MANIFEST_NAME};

/// The smallest section passing validation.
pub const MINIMAL_SECTION: &str = r#"
name = "demo"
version = "1.0.0"
authors = ["Jane Doe <jane@example.com>"]
"#;

/// Parse a `[tool.poetry]` section body.
pub fn section(content: &str) -> ManifestSection {
    toml::from_str(content).expect("fixture section is valid TOML")
}

/// Fixture for a project directory holding a pyproject.toml.
#[derive(Debug, Clone)]
pub struct ProjectFixture {
    /// Directory name.
    pub name: String,
    /// pyproject.toml content.
    pub manifest: String,
    /// Other files (path relative to project root -> content).
    pub files: HashMap<PathBuf, String>,
}

impl ProjectFixture {
    /// Create a project fixture without a manifest.
    pub fn new(name: impl Into<String>) -> Self {
        ProjectFixture {
            name: name.into(),
            manifest: String::new(),
            files: HashMap::new(),
        }
    }

    /// A project with a minimal valid `[tool.poetry]` section.
    pub fn minimal(name: impl Into<String>) -> Self {
        let name = name.into();
        let manifest = pyprojects::minimal(&name);
        Self::new(name).with_manifest(manifest)
    }

    /// Set the manifest content.
    pub fn with_manifest(mut self, manifest: impl Into<String>) -> Self {
        self.manifest = manifest.into();
        self
    }

    /// Add a file.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Write this fixture to a real directory.
    pub fn write_to(&self, base_path: &Path) -> std::io::Result<PathBuf> {
        let project_path = base_path.join(&self.name);
        std::fs::create_dir_all(&project_path)?;

        std::fs::write(project_path.join(MANIFEST_NAME), &self.manifest)?;

        for (rel_path, content) in &self.files {
            let full_path = project_path.join(rel_path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&full_path, content)?;
        }

        Ok(project_path)
    }
}

/// Common pyproject.toml templates.
pub mod pyprojects {
    /// A minimal valid project.
    pub fn minimal(name: &str) -> String {
        format!(
            r#"[tool.poetry]
name = "{name}"
version = "0.1.0"
authors = ["Jane Doe <jane@example.com>"]
"#
        )
    }

    /// A project with main, dev and optional dependencies and an extra.
    pub fn with_extras(name: &str) -> String {
        format!(
            r#"[tool.poetry]
name = "{name}"
version = "1.2.3"
description = "Some description."
authors = ["Jane Doe <jane@example.com>"]
license = "MIT"
readme = "README.md"

[tool.poetry.dependencies]
python = "^3.8"
requests = "^2.25"
click = {{ version = "^8.0", optional = true }}

[tool.poetry.dev-dependencies]
pytest = "^6.0"

[tool.poetry.extras]
cli = ["click"]

[tool.poetry.scripts]
{name} = {{ callable = "{name}.cli:main", extras = ["cli"] }}

[build-system]
requires = ["poetry-core>=1.0.0"]
build-backend = "poetry.core.masonry.api"
"#
        )
    }

    /// A project whose section lacks `authors` and has a mistyped version.
    pub fn invalid(name: &str) -> String {
        format!(
            r#"[tool.poetry]
name = "{name}"
version = 1
"#
        )
    }

    /// A pyproject.toml without `[tool.poetry]`.
    pub fn without_poetry(name: &str) -> String {
        format!(
            r#"[project]
name = "{name}"
version = "0.1.0"
"#
        )
    }
}
