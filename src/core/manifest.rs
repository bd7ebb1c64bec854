//! pyproject.toml manifest parsing.
//!
//! The document is parsed into an order-preserving TOML table. The
//! `[tool.poetry]` section is validated in that raw form, then converted to
//! [`PoetrySection`], a typed view whose heterogeneous values (scalar, list or
//! table) are captured as untagged enums and normalized right away.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::dependency::DependencySpec;
use crate::core::errors::ManifestError;

/// Manifest file name.
pub const MANIFEST_NAME: &str = "pyproject.toml";

/// Dependency key holding the Python version constraint (case-insensitive).
pub const PYTHON_MARKER: &str = "python";

/// The raw `[tool.poetry]` table.
pub type ManifestSection = toml::Table;

/// A parsed pyproject.toml document.
#[derive(Debug, Clone)]
pub struct PyProject {
    /// Path the document was read from
    path: PathBuf,

    /// Whole document
    document: toml::Table,
}

impl PyProject {
    /// Load a manifest from a file path.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, path)
    }

    /// Parse manifest content.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ManifestError> {
        let document = toml::from_str(content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(PyProject {
            path: path.to_path_buf(),
            document,
        })
    }

    /// Get the manifest path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the whole document.
    pub fn document(&self) -> &toml::Table {
        &self.document
    }

    /// Get the `[tool.poetry]` section.
    pub fn poetry_config(&self) -> Result<&ManifestSection, ManifestError> {
        self.document
            .get("tool")
            .and_then(toml::Value::as_table)
            .and_then(|tool| tool.get("poetry"))
            .and_then(toml::Value::as_table)
            .ok_or_else(|| ManifestError::MissingSection {
                file: self
                    .path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| MANIFEST_NAME.to_string()),
            })
    }
}

/// Typed view of `[tool.poetry]`.
///
/// Unknown keys are ignored. Only the keys the package builder consumes are
/// modelled; `scripts` and `source` stay in the raw section.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PoetrySection {
    pub name: String,

    pub version: String,

    pub authors: Vec<String>,

    #[serde(default)]
    pub maintainers: Vec<String>,

    pub description: Option<String>,

    pub homepage: Option<String>,

    pub repository: Option<String>,

    pub documentation: Option<String>,

    pub license: Option<String>,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub classifiers: Vec<String>,

    pub readme: Option<String>,

    pub platform: Option<String>,

    #[serde(default)]
    pub dependencies: IndexMap<String, DependencySpec>,

    #[serde(default)]
    pub dev_dependencies: IndexMap<String, DependencySpec>,

    #[serde(default)]
    pub extras: IndexMap<String, Vec<String>>,

    pub build: Option<BuildSpec>,

    pub include: Option<Vec<IncludeSpec>>,

    pub exclude: Option<Vec<toml::Value>>,

    pub packages: Option<Vec<toml::Value>>,

    pub urls: Option<IndexMap<String, String>>,
}

impl PoetrySection {
    /// Convert a raw section into the typed view.
    pub fn from_table(section: &ManifestSection) -> Result<Self, ManifestError> {
        toml::Value::Table(section.clone())
            .try_into()
            .map_err(|e: toml::de::Error| ManifestError::Malformed {
                message: e.message().to_string(),
            })
    }
}

/// `build` value: a bare script path or a table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BuildSpec {
    /// `build = "build.py"`
    Script(String),

    /// `build = { script = "build.py", generate-setup-file = false }`
    Table(toml::Table),
}

impl BuildSpec {
    /// Normalize to table form.
    pub fn into_table(self) -> toml::Table {
        match self {
            BuildSpec::Script(script) => {
                let mut table = toml::Table::new();
                table.insert("script".to_string(), toml::Value::String(script));
                table
            }
            BuildSpec::Table(table) => table,
        }
    }
}

/// `format` value of an include rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FormatSpec {
    One(String),
    Many(Vec<String>),
}

impl FormatSpec {
    /// Normalize to a list; an empty string means no formats.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            FormatSpec::One(format) if format.is_empty() => Vec::new(),
            FormatSpec::One(format) => vec![format],
            FormatSpec::Many(formats) => formats,
        }
    }
}

/// `include` entry: a bare path or a table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IncludeSpec {
    /// `include = ["CHANGELOG.md"]`
    Path(String),

    /// `include = [{ path = "data/*", format = "sdist" }]`
    Detailed {
        path: String,
        #[serde(default)]
        format: Option<FormatSpec>,
    },
}

impl IncludeSpec {
    /// Normalize to an [`IncludeRule`].
    pub fn into_rule(self) -> IncludeRule {
        match self {
            IncludeSpec::Path(path) => IncludeRule {
                path,
                format: Vec::new(),
            },
            IncludeSpec::Detailed { path, format } => IncludeRule {
                path,
                format: format.map(FormatSpec::into_vec).unwrap_or_default(),
            },
        }
    }
}

/// A normalized include rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncludeRule {
    /// Glob pattern, relative to the project root
    pub path: String,

    /// Distribution formats the rule applies to (empty means all)
    pub format: Vec<String>,
}
