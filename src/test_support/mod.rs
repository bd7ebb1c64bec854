//! Test utilities shared by unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use poetry_factory::test_support::{create_test_project, pyprojects};
//!
//! #[test]
//! fn test_example() {
//!     let tmp = create_test_project(&pyprojects::minimal("demo"));
//!     let project = create_project(Some(tmp.path())).unwrap();
//! }
//! ```

pub mod fixtures;

// Re-export fixtures for convenience
pub use fixtures::*;

/// Helper to create a temporary project directory with a pyproject.toml.
///
/// Returns the TempDir handle - dropping it will clean up the directory.
pub fn create_test_project(manifest: &str) -> tempfile::TempDir {
    let tmp = tempfile::TempDir::new().expect("failed to create temp dir");
    let manifest_path = tmp.path().join(crate::core::manifest::MANIFEST_NAME);
    std::fs::write(&manifest_path, manifest).expect("failed to write manifest");
    tmp
}

/// Assertion helpers for testing.
pub mod assertions {
    /// Assert that a result is Err and return the error.
    pub fn assert_err<T: std::fmt::Debug, E>(result: Result<T, E>) -> E {
        match result {
            Ok(v) => panic!("expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    }

    /// Assert that an error message contains a substring.
    pub fn assert_error_contains<T: std::fmt::Debug, E: std::fmt::Display>(
        result: Result<T, E>,
        substring: &str,
    ) {
        match result {
            Ok(v) => panic!("expected Err containing '{}', got Ok: {:?}", substring, v),
            Err(e) => {
                let msg = e.to_string();
                assert!(
                    msg.contains(substring),
                    "error '{}' does not contain '{}'",
                    msg,
                    substring
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_write_to() {
        let tmp = tempfile::TempDir::new().unwrap();
        let fixture = ProjectFixture::minimal("demo").with_file("README.md", "# demo\n");

        let root = fixture.write_to(tmp.path()).unwrap();
        assert!(root.join("pyproject.toml").is_file());
        assert_eq!(std::fs::read_to_string(root.join("README.md")).unwrap(), "# demo\n");
    }

    #[test]
    fn test_templates_parse() {
        for manifest in [
            pyprojects::minimal("demo"),
            pyprojects::with_extras("demo"),
            pyprojects::invalid("demo"),
            pyprojects::without_poetry("demo"),
        ] {
            assert!(manifest.parse::<toml::Table>().is_ok(), "{manifest}");
        }
    }
}
