//! Validation of the `[tool.poetry]` section.
//!
//! Schema violations are always reported. Strict mode adds semantic checks
//! that the schema cannot express: ambiguous or deprecated dependency
//! settings (warnings) and scripts requesting undeclared extras (errors).

use serde::Serialize;

use crate::core::manifest::{ManifestSection, PYTHON_MARKER};
use crate::util::schema::{self, SchemaError};

/// Name of the schema `[tool.poetry]` is checked against.
pub const SCHEMA_NAME: &str = schema::POETRY_SCHEMA;

/// Outcome of a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Blocking problems
    pub errors: Vec<String>,

    /// Informational problems
    pub warnings: Vec<String>,
}

impl CheckResult {
    /// Whether no errors were found. Warnings do not count.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a `[tool.poetry]` section.
pub fn validate(config: &ManifestSection, strict: bool) -> Result<CheckResult, SchemaError> {
    let mut result = CheckResult {
        errors: schema::validate_object(config, SCHEMA_NAME)?,
        warnings: Vec::new(),
    };

    if strict {
        check_dependencies(config, &mut result);
        check_scripts(config, &mut result);
    }

    tracing::debug!(
        "validated [tool.poetry] (strict: {}): {} error(s), {} warning(s)",
        strict,
        result.errors.len(),
        result.warnings.len()
    );

    Ok(result)
}

fn check_dependencies(config: &ManifestSection, result: &mut CheckResult) {
    let Some(dependencies) = config.get("dependencies").and_then(toml::Value::as_table) else {
        return;
    };

    let python = dependencies
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(PYTHON_MARKER))
        .and_then(|(_, constraint)| constraint.as_str());
    if python == Some("*") {
        result.warnings.push(
            "A wildcard Python dependency is ambiguous. \
             Consider specifying a more explicit one."
                .to_string(),
        );
    }

    for (name, constraint) in dependencies {
        let deprecated = constraint
            .as_table()
            .is_some_and(|table| table.contains_key("allows-prereleases"));

        if deprecated {
            result.warnings.push(format!(
                "The \"{}\" dependency specifies the \"allows-prereleases\" property, \
                 which is deprecated. Use \"allow-prereleases\" instead.",
                name
            ));
        }
    }
}

fn check_scripts(config: &ManifestSection, result: &mut CheckResult) {
    let Some(scripts) = config.get("scripts").and_then(toml::Value::as_table) else {
        return;
    };

    let extras = config.get("extras").and_then(toml::Value::as_table);

    for (script, spec) in scripts {
        let Some(requested) = spec
            .as_table()
            .and_then(|table| table.get("extras"))
            .and_then(toml::Value::as_array)
        else {
            continue;
        };

        for extra in requested.iter().filter_map(toml::Value::as_str) {
            if !extras.is_some_and(|declared| declared.contains_key(extra)) {
                result.errors.push(format!(
                    "Script \"{}\" requires extra \"{}\" which is not defined.",
                    script, extra
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(content: &str) -> ManifestSection {
        toml::from_str(content).unwrap()
    }

    const HEADER: &str = r#"
name = "demo"
version = "1.0.0"
authors = ["Jane Doe <jane@example.com>"]
"#;

    #[test]
    fn test_valid_section() {
        let config = section(&format!(
            r#"{HEADER}
[dependencies]
python = "^3.8"
requests = "^2.25"
"#
        ));

        let result = validate(&config, true).unwrap();
        assert!(result.is_valid());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_schema_errors_are_reported_in_order() {
        let config = section(
            r#"
version = 1
"#,
        );

        let result = validate(&config, false).unwrap();
        assert_eq!(
            result.errors,
            vec![
                "'name' is a required property".to_string(),
                "'authors' is a required property".to_string(),
                "[version] 1 is not of type 'string'".to_string(),
            ]
        );
    }

    #[test]
    fn test_wildcard_python_warning() {
        let config = section(&format!("{HEADER}\n[dependencies]\nPython = \"*\"\n"));

        let result = validate(&config, true).unwrap();
        assert!(result.is_valid());
        assert_eq!(
            result.warnings,
            vec![
                "A wildcard Python dependency is ambiguous. \
                 Consider specifying a more explicit one."
                    .to_string()
            ]
        );

        let lenient = validate(&config, false).unwrap();
        assert!(lenient.warnings.is_empty());
    }

    #[test]
    fn test_deprecated_prereleases_warning() {
        let config = section(&format!(
            r#"{HEADER}
[dependencies]
python = "^3.8"
legacy = {{ version = "^1.0", allows-prereleases = true }}
modern = {{ version = "^1.0", allow-prereleases = true }}
"#
        ));

        let result = validate(&config, true).unwrap();
        assert!(result.is_valid());
        assert_eq!(
            result.warnings,
            vec![
                "The \"legacy\" dependency specifies the \"allows-prereleases\" property, \
                 which is deprecated. Use \"allow-prereleases\" instead."
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_script_requires_undefined_extra() {
        let config = section(&format!(
            r#"{HEADER}
[extras]
cli = []

[scripts]
plain = "demo:main"
fancy = {{ callable = "demo:fancy", extras = ["cli", "gui"] }}
"#
        ));

        let result = validate(&config, true).unwrap();
        assert_eq!(
            result.errors,
            vec!["Script \"fancy\" requires extra \"gui\" which is not defined.".to_string()]
        );

        assert!(validate(&config, false).unwrap().is_valid());
    }

    #[test]
    fn test_script_extras_without_extras_section() {
        let config = section(&format!(
            r#"{HEADER}
[scripts]
fancy = {{ callable = "demo:fancy", extras = ["cli"] }}
bare = {{ callable = "demo:bare" }}
"#
        ));

        let result = validate(&config, true).unwrap();
        assert_eq!(
            result.errors,
            vec!["Script \"fancy\" requires extra \"cli\" which is not defined.".to_string()]
        );
    }

    #[test]
    fn test_strict_without_dependencies() {
        let config = section(HEADER);
        let result = validate(&config, true).unwrap();
        assert_eq!(result, CheckResult::default());
    }
}
