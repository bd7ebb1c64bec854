//! Project creation: locate, read, validate and configure.

use std::path::{Path, PathBuf};

use crate::core::errors::ManifestError;
use crate::core::manifest::PyProject;
use crate::core::project::{find_manifest, Project};
use crate::ops::configure::configure_package;
use crate::ops::validate::validate;

/// Create the project whose pyproject.toml is found from `cwd`.
///
/// The search starts at `cwd`, or the process working directory when `None`,
/// and walks up the ancestors.
pub fn create_project(cwd: Option<&Path>) -> Result<Project, ManifestError> {
    let start = match cwd {
        Some(dir) => absolute(dir)?,
        None => std::env::current_dir().map_err(|source| ManifestError::Io {
            path: PathBuf::from("."),
            source,
        })?,
    };

    let manifest_path = find_manifest(&start)?;
    load_project(&manifest_path)
}

/// Create the project described by the manifest at `path`.
pub fn load_project(path: &Path) -> Result<Project, ManifestError> {
    let path = absolute(path)?;
    tracing::debug!("loading project from {}", path.display());

    let pyproject = PyProject::load(&path)?;
    let config = pyproject.poetry_config()?;

    let check = validate(config, false)?;
    if !check.is_valid() {
        return Err(ManifestError::Validation {
            errors: check.errors,
        });
    }

    let name = required_str(config, "name")?;
    let version = required_str(config, "version")?;
    let root = path.parent().unwrap_or(Path::new("/"));

    let package = configure_package(name, version, config, root)?;

    Ok(Project::new(path.clone(), config.clone(), package))
}

fn required_str<'a>(config: &'a toml::Table, key: &str) -> Result<&'a str, ManifestError> {
    config
        .get(key)
        .and_then(toml::Value::as_str)
        .ok_or_else(|| ManifestError::Malformed {
            message: format!("missing string `{}`", key),
        })
}

fn absolute(path: &Path) -> Result<PathBuf, ManifestError> {
    std::path::absolute(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })
}
