//! poetry-factory - turn a pyproject.toml `[tool.poetry]` section into a
//! validated project package.
//!
//! The entry point is [`create_project`], which locates the manifest, checks
//! it against the Poetry schema and builds a [`ProjectPackage`].

pub mod core;
pub mod ops;
pub mod util;

/// Test utilities for unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use core::{
    dependency::Dependency, errors::ManifestError, package::ProjectPackage, project::Project,
};

pub use ops::{create_project, load_project, validate, CheckResult};
pub use util::context::GlobalContext;
