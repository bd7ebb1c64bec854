//! Project - manifest discovery and the loaded project handle.

use std::path::{Path, PathBuf};

use crate::core::errors::ManifestError;
use crate::core::manifest::{ManifestSection, MANIFEST_NAME};
use crate::core::package::ProjectPackage;

/// Find `pyproject.toml` in `start` or the nearest ancestor containing one.
///
/// Only existence is checked; no candidate is read.
pub fn find_manifest(start: &Path) -> Result<PathBuf, ManifestError> {
    for dir in start.ancestors() {
        let candidate = dir.join(MANIFEST_NAME);
        tracing::debug!("looking for {}", candidate.display());

        if candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(ManifestError::NotFound {
        dir: start.to_path_buf(),
    })
}

/// A loaded project: manifest location, raw configuration and package.
#[derive(Debug, Clone)]
pub struct Project {
    /// Absolute path of pyproject.toml
    file: PathBuf,

    /// The validated `[tool.poetry]` table
    local_config: ManifestSection,

    /// The root package
    package: ProjectPackage,
}

impl Project {
    pub(crate) fn new(file: PathBuf, local_config: ManifestSection, package: ProjectPackage) -> Self {
        Project {
            file,
            local_config,
            package,
        }
    }

    /// Get the manifest path.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Get the raw `[tool.poetry]` configuration.
    pub fn local_config(&self) -> &ManifestSection {
        &self.local_config
    }

    /// Get the root package.
    pub fn package(&self) -> &ProjectPackage {
        &self.package
    }

    /// Get the project root directory.
    pub fn root(&self) -> &Path {
        self.package.root_dir()
    }
}
