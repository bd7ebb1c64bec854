//! ProjectPackage - the package model built from `[tool.poetry]`.
//!
//! Dependencies are shared through `Arc`: an extra holds the very same
//! allocation as the corresponding entry of [`ProjectPackage::requires`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::dependency::{Dependency, DependencyCategory};
use crate::core::license::License;
use crate::core::manifest::IncludeRule;

/// The root package of a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectPackage {
    name: String,
    version: String,

    pub(crate) authors: Vec<String>,
    pub(crate) maintainers: Vec<String>,

    pub(crate) description: Option<String>,
    pub(crate) homepage: Option<String>,
    pub(crate) repository_url: Option<String>,
    pub(crate) documentation_url: Option<String>,

    pub(crate) license: Option<License>,
    pub(crate) keywords: Vec<String>,
    pub(crate) classifiers: Vec<String>,
    pub(crate) readme: Option<PathBuf>,
    pub(crate) platform: Option<String>,

    /// Python version constraint from the `python` dependency key
    pub(crate) python_versions: Option<String>,

    /// Main and dev dependencies in declaration order
    pub(crate) requires: Vec<Arc<Dependency>>,

    pub(crate) extras: IndexMap<String, Vec<Arc<Dependency>>>,

    pub(crate) build_config: Option<toml::Table>,
    pub(crate) include: Vec<IncludeRule>,
    pub(crate) exclude: Vec<toml::Value>,
    pub(crate) packages: Vec<toml::Value>,
    pub(crate) custom_urls: IndexMap<String, String>,

    /// Directory containing the manifest
    root_dir: PathBuf,
}

impl ProjectPackage {
    /// Create an empty package rooted at `root_dir`.
    pub fn new(name: impl Into<String>, version: impl Into<String>, root_dir: PathBuf) -> Self {
        ProjectPackage {
            name: name.into(),
            version: version.into(),
            authors: Vec::new(),
            maintainers: Vec::new(),
            description: None,
            homepage: None,
            repository_url: None,
            documentation_url: None,
            license: None,
            keywords: Vec::new(),
            classifiers: Vec::new(),
            readme: None,
            platform: None,
            python_versions: None,
            requires: Vec::new(),
            extras: IndexMap::new(),
            build_config: None,
            include: Vec::new(),
            exclude: Vec::new(),
            packages: Vec::new(),
            custom_urls: IndexMap::new(),
            root_dir,
        }
    }

    /// Get the package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the package version.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn maintainers(&self) -> &[String] {
        &self.maintainers
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn homepage(&self) -> Option<&str> {
        self.homepage.as_deref()
    }

    pub fn repository_url(&self) -> Option<&str> {
        self.repository_url.as_deref()
    }

    pub fn documentation_url(&self) -> Option<&str> {
        self.documentation_url.as_deref()
    }

    /// Get the resolved license, if the identifier was recognized.
    pub fn license(&self) -> Option<&License> {
        self.license.as_ref()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Get the declared classifiers.
    pub fn classifiers(&self) -> &[String] {
        &self.classifiers
    }

    /// Get the declared classifiers followed by the license classifier.
    pub fn all_classifiers(&self) -> Vec<String> {
        let mut classifiers = self.classifiers.clone();
        if let Some(classifier) = self.license_classifier() {
            if !classifiers.contains(&classifier) {
                classifiers.push(classifier);
            }
        }
        classifiers
    }

    /// Get the trove classifier of the license.
    pub fn license_classifier(&self) -> Option<String> {
        self.license.as_ref().map(License::classifier)
    }

    /// Get the readme path, resolved against the root directory.
    pub fn readme(&self) -> Option<&Path> {
        self.readme.as_deref()
    }

    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    /// Get the Python version constraint.
    pub fn python_versions(&self) -> Option<&str> {
        self.python_versions.as_deref()
    }

    /// Get all dependencies, main and dev, in declaration order.
    pub fn requires(&self) -> &[Arc<Dependency>] {
        &self.requires
    }

    /// Get the main dependencies.
    pub fn dependencies(&self) -> impl Iterator<Item = &Arc<Dependency>> {
        self.by_category(DependencyCategory::Main)
    }

    /// Get the dev dependencies.
    pub fn dev_dependencies(&self) -> impl Iterator<Item = &Arc<Dependency>> {
        self.by_category(DependencyCategory::Dev)
    }

    fn by_category(&self, category: DependencyCategory) -> impl Iterator<Item = &Arc<Dependency>> {
        self.requires
            .iter()
            .filter(move |dep| dep.category() == category)
    }

    /// Get the extras and the dependencies they expose.
    pub fn extras(&self) -> &IndexMap<String, Vec<Arc<Dependency>>> {
        &self.extras
    }

    /// Get the build configuration.
    pub fn build_config(&self) -> Option<&toml::Table> {
        self.build_config.as_ref()
    }

    pub fn include(&self) -> &[IncludeRule] {
        &self.include
    }

    pub fn exclude(&self) -> &[toml::Value] {
        &self.exclude
    }

    pub fn packages(&self) -> &[toml::Value] {
        &self.packages
    }

    /// Get the `[tool.poetry.urls]` entries.
    pub fn custom_urls(&self) -> &IndexMap<String, String> {
        &self.custom_urls
    }

    /// Get the project root directory.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }
}

impl fmt::Display for ProjectPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.version)
    }
}
