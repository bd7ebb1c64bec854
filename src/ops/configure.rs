//! Build a [`ProjectPackage`] from a `[tool.poetry]` section.

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::core::dependency::{Constraint, Dependency, DependencyCategory, DependencySpec};
use crate::core::errors::ManifestError;
use crate::core::license::License;
use crate::core::manifest::{
    BuildSpec, IncludeSpec, ManifestSection, PoetrySection, PYTHON_MARKER,
};
use crate::core::package::ProjectPackage;

/// Map a `[tool.poetry]` section onto a new package rooted at `root`.
///
/// The section is expected to have passed validation. Shapes the builder
/// cannot interpret are reported as [`ManifestError::Malformed`].
pub fn configure_package(
    name: &str,
    version: &str,
    config: &ManifestSection,
    root: &Path,
) -> Result<ProjectPackage, ManifestError> {
    let section = PoetrySection::from_table(config)?;
    let mut package = ProjectPackage::new(name, version, root.to_path_buf());

    package.authors = section.authors;
    package.maintainers = section.maintainers;

    package.description = section.description;
    package.homepage = section.homepage;
    package.repository_url = section.repository;
    package.documentation_url = section.documentation;
    package.keywords = section.keywords;
    package.classifiers = section.classifiers;
    package.readme = section.readme.map(|readme| root.join(readme));
    package.platform = section.platform;

    let license_id = section.license.as_deref().unwrap_or("");
    package.license = match License::by_id(license_id) {
        Ok(license) => Some(license),
        Err(e) => {
            tracing::debug!("ignoring license: {}", e);
            None
        }
    };

    let mut requires = Vec::new();

    for (dep_name, spec) in section.dependencies {
        if dep_name.eq_ignore_ascii_case(PYTHON_MARKER) {
            package.python_versions = Some(python_constraint(spec));
            continue;
        }
        expand(&mut requires, dep_name, spec, DependencyCategory::Main);
    }

    for (dep_name, spec) in section.dev_dependencies {
        expand(&mut requires, dep_name, spec, DependencyCategory::Dev);
    }

    let (requires, extras) = link_extras(requires, &section.extras);
    package.requires = requires;
    package.extras = extras;

    package.build_config = section.build.map(BuildSpec::into_table);
    package.include = section
        .include
        .unwrap_or_default()
        .into_iter()
        .map(IncludeSpec::into_rule)
        .collect();
    package.exclude = section.exclude.unwrap_or_default();
    package.packages = section.packages.unwrap_or_default();
    package.custom_urls = section.urls.unwrap_or_default();

    tracing::debug!(
        "configured {} with {} dependencies and {} extras",
        package,
        package.requires.len(),
        package.extras.len()
    );

    Ok(package)
}

/// Push one dependency per declared constraint.
fn expand(
    requires: &mut Vec<Dependency>,
    name: String,
    spec: DependencySpec,
    category: DependencyCategory,
) {
    for constraint in spec.into_constraints() {
        requires.push(Dependency::new(name.clone(), constraint).with_category(category));
    }
}

/// Render the Python constraint; several constraints are joined with `,`.
fn python_constraint(spec: DependencySpec) -> String {
    spec.into_constraints()
        .iter()
        .map(Constraint::pretty)
        .collect::<Vec<_>>()
        .join(",")
}

/// Resolve extras against the materialized dependencies.
///
/// References match the first dependency with exactly the same name; the
/// extra is recorded on that dependency and the dependency is listed under
/// the extra. Unmatched references are dropped.
fn link_extras(
    mut requires: Vec<Dependency>,
    declared: &IndexMap<String, Vec<String>>,
) -> (Vec<Arc<Dependency>>, IndexMap<String, Vec<Arc<Dependency>>>) {
    let mut links: IndexMap<&str, Vec<usize>> = IndexMap::with_capacity(declared.len());

    for (extra, references) in declared {
        let indices = links.entry(extra.as_str()).or_default();

        for reference in references {
            let wanted = Dependency::new(reference.as_str(), "*");
            match requires.iter().position(|dep| dep.name() == wanted.name()) {
                Some(index) => {
                    requires[index].add_extra(extra);
                    indices.push(index);
                }
                None => {
                    tracing::debug!("extra `{}` references unknown dependency `{}`", extra, reference);
                }
            }
        }
    }

    let requires: Vec<Arc<Dependency>> = requires.into_iter().map(Arc::new).collect();
    let extras = links
        .into_iter()
        .map(|(extra, indices)| {
            let deps = indices.into_iter().map(|i| Arc::clone(&requires[i])).collect();
            (extra.to_string(), deps)
        })
        .collect();

    (requires, extras)
}
