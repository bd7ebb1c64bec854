//! Core data structures.
//!
//! This module contains the foundational types used throughout the crate:
//! - The pyproject.toml document and its `[tool.poetry]` section
//! - Dependencies and the project package
//! - License lookup
//! - Manifest discovery and the loaded project

pub mod dependency;
pub mod errors;
pub mod license;
pub mod manifest;
pub mod package;
pub mod project;

pub use dependency::{Constraint, Dependency, DependencyCategory};
pub use errors::ManifestError;
pub use license::License;
pub use manifest::{ManifestSection, PyProject, MANIFEST_NAME};
pub use package::ProjectPackage;
pub use project::{find_manifest, Project};
