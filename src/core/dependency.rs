//! Dependency specification.
//!
//! A Dependency describes one requirement declared in the `dependencies` or
//! `dev-dependencies` table of `[tool.poetry]`, together with the category it
//! was declared under and the extras that expose it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The dependency section a requirement was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyCategory {
    /// `[tool.poetry.dependencies]`
    #[default]
    Main,
    /// `[tool.poetry.dev-dependencies]`
    Dev,
}

impl DependencyCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyCategory::Main => "main",
            DependencyCategory::Dev => "dev",
        }
    }
}

impl fmt::Display for DependencyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single constraint as it appears in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Constraint {
    /// Simple version string: `requests = "^2.0"`
    Version(String),

    /// Table form: `requests = { version = "^2.0", optional = true }`
    Detailed(DetailedDependencySpec),
}

impl Constraint {
    /// Human-readable form of the constraint.
    ///
    /// VCS constraints render as `branch master`, `tag v1.0` or `rev abc123`;
    /// path, file and url constraints without a version render as `*`.
    pub fn pretty(&self) -> String {
        match self {
            Constraint::Version(version) => version.clone(),
            Constraint::Detailed(spec) => {
                if spec.git.is_some() {
                    if let Some(ref tag) = spec.tag {
                        format!("tag {}", tag)
                    } else if let Some(ref rev) = spec.rev {
                        format!("rev {}", rev)
                    } else {
                        format!("branch {}", spec.branch.as_deref().unwrap_or("master"))
                    }
                } else {
                    spec.version.clone().unwrap_or_else(|| "*".to_string())
                }
            }
        }
    }

    /// Get the detailed specification, if this is a table constraint.
    pub fn detailed(&self) -> Option<&DetailedDependencySpec> {
        match self {
            Constraint::Version(_) => None,
            Constraint::Detailed(spec) => Some(spec),
        }
    }
}

impl From<&str> for Constraint {
    fn from(version: &str) -> Self {
        Constraint::Version(version.to_string())
    }
}

impl From<String> for Constraint {
    fn from(version: String) -> Self {
        Constraint::Version(version)
    }
}

impl From<DetailedDependencySpec> for Constraint {
    fn from(spec: DetailedDependencySpec) -> Self {
        Constraint::Detailed(spec)
    }
}

/// Detailed dependency specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DetailedDependencySpec {
    /// Version constraint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Python versions the dependency applies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub python: Option<String>,

    /// Platform the dependency applies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// PEP 508 environment markers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markers: Option<String>,

    /// Whether pre-release versions may satisfy the constraint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_prereleases: Option<bool>,

    /// Deprecated spelling of `allow-prereleases`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allows_prereleases: Option<bool>,

    /// Whether this dependency is only installed through an extra
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,

    /// Extras of the dependency itself to install
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<Vec<String>>,

    /// Named package source to fetch from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Git repository URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<String>,

    /// Git branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// Git tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Git revision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,

    /// Install in editable mode (git and path dependencies)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub develop: Option<bool>,

    /// Local directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Local archive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Remote archive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Dependency value as it appears in a dependency table.
///
/// A list declares several constraints for the same name (typically each
/// restricted to different Python versions or platforms).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DependencySpec {
    /// `black = [{ version = "^20.0", python = "<3.8" }, "^21.0"]`
    Multiple(Vec<Constraint>),

    /// `black = "^21.0"` or `black = { version = "^21.0" }`
    Single(Constraint),
}

impl DependencySpec {
    /// Expand into one constraint per declared entry.
    pub fn into_constraints(self) -> Vec<Constraint> {
        match self {
            DependencySpec::Multiple(constraints) => constraints,
            DependencySpec::Single(constraint) => vec![constraint],
        }
    }
}

/// A dependency of the project package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    /// Package name, as declared
    name: String,

    /// Declared constraint
    constraint: Constraint,

    /// Section the dependency was declared in
    category: DependencyCategory,

    /// Extras exposing this dependency, in linking order
    in_extras: Vec<String>,
}

impl Dependency {
    /// Create a new main dependency.
    pub fn new(name: impl Into<String>, constraint: impl Into<Constraint>) -> Self {
        Dependency {
            name: name.into(),
            constraint: constraint.into(),
            category: DependencyCategory::Main,
            in_extras: Vec::new(),
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: DependencyCategory) -> Self {
        self.category = category;
        self
    }

    /// Record that the extra `extra` exposes this dependency.
    pub(crate) fn add_extra(&mut self, extra: &str) {
        self.in_extras.push(extra.to_string());
    }

    /// Get the package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the declared constraint.
    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    /// Get the human-readable constraint.
    pub fn pretty_constraint(&self) -> String {
        self.constraint.pretty()
    }

    /// Get the category.
    pub fn category(&self) -> DependencyCategory {
        self.category
    }

    /// Get the extras exposing this dependency.
    pub fn in_extras(&self) -> &[String] {
        &self.in_extras
    }

    /// Check if this dependency is optional.
    pub fn is_optional(&self) -> bool {
        self.detailed().and_then(|d| d.optional).unwrap_or(false)
    }

    /// Check if pre-releases are accepted, honouring the deprecated key.
    pub fn allows_prereleases(&self) -> bool {
        self.detailed()
            .and_then(|d| d.allow_prereleases.or(d.allows_prereleases))
            .unwrap_or(false)
    }

    /// Python versions this dependency is restricted to.
    pub fn python_versions(&self) -> Option<&str> {
        self.detailed().and_then(|d| d.python.as_deref())
    }

    /// Extras of the dependency itself that should be installed.
    pub fn extras(&self) -> &[String] {
        self.detailed()
            .and_then(|d| d.extras.as_deref())
            .unwrap_or(&[])
    }

    /// Check if this is a git dependency.
    pub fn is_vcs(&self) -> bool {
        self.detailed().is_some_and(|d| d.git.is_some())
    }

    /// Check if this is a local directory dependency.
    pub fn is_directory(&self) -> bool {
        self.detailed().is_some_and(|d| d.path.is_some())
    }

    /// Check if this is a local archive dependency.
    pub fn is_file(&self) -> bool {
        self.detailed().is_some_and(|d| d.file.is_some())
    }

    /// Check if this is a remote archive dependency.
    pub fn is_url(&self) -> bool {
        self.detailed().is_some_and(|d| d.url.is_some())
    }

    fn detailed(&self) -> Option<&DetailedDependencySpec> {
        self.constraint.detailed()
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.pretty_constraint())
    }
}
