//! Errors raised while locating and loading a project manifest.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::schema::SchemaError;

/// Fatal error while locating, reading, validating or mapping a manifest.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ManifestError {
    #[error("could not find a pyproject.toml file in {} or its parents", .dir.display())]
    #[diagnostic(code(poetry_factory::manifest::not_found))]
    NotFound { dir: PathBuf },

    #[error("failed to read manifest: {}", .path.display())]
    #[diagnostic(code(poetry_factory::manifest::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", .path.display())]
    #[diagnostic(code(poetry_factory::manifest::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("[tool.poetry] section not found in {file}")]
    #[diagnostic(code(poetry_factory::manifest::missing_section))]
    MissingSection { file: String },

    #[error("The Poetry configuration is invalid:\n{}", bullet_list(.errors))]
    #[diagnostic(code(poetry_factory::manifest::invalid))]
    Validation { errors: Vec<String> },

    #[error("invalid [tool.poetry] section: {message}")]
    #[diagnostic(code(poetry_factory::manifest::malformed))]
    Malformed { message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] SchemaError),
}

fn bullet_list(errors: &[String]) -> String {
    errors.iter().map(|e| format!("  - {}\n", e)).collect()
}

impl ManifestError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ManifestError::NotFound { dir } => Diagnostic::error(format!(
                "could not find a pyproject.toml file in {} or its parents",
                dir.display()
            ))
            .with_help(suggestions::NO_MANIFEST),

            ManifestError::Io { path, source } => {
                Diagnostic::error(format!("failed to read {}", path.display()))
                    .with_note(source.to_string())
                    .in_manifest(path)
            }

            ManifestError::Parse { path, source } => {
                Diagnostic::error(format!("failed to parse {}", path.display()))
                    .with_note(source.message().to_string())
                    .in_manifest(path)
                    .with_help(suggestions::FIX_SYNTAX)
            }

            ManifestError::MissingSection { file } => {
                Diagnostic::error(format!("[tool.poetry] section not found in {}", file))
                    .with_help(suggestions::MISSING_SECTION)
            }

            ManifestError::Validation { errors } => {
                let mut diag = Diagnostic::error("The Poetry configuration is invalid");
                for error in errors {
                    diag = diag.with_note(error.clone());
                }
                diag.with_help(suggestions::INVALID_CONFIG)
            }

            ManifestError::Malformed { message } => {
                Diagnostic::error(format!("invalid [tool.poetry] section: {}", message))
                    .with_help(suggestions::INVALID_CONFIG)
            }

            ManifestError::Schema(err) => Diagnostic::error(err.to_string()),
        }
    }
}
