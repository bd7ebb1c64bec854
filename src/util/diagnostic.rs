//! User-facing diagnostics for manifest problems.
//!
//! A diagnostic names the manifest it concerns and, for problems found by
//! validation, the key inside `[tool.poetry]` that caused it:
//!
//! ```text
//! error: 1 is not of type 'string'
//!   --> /work/demo/pyproject.toml: tool.poetry.version
//!   = help: Run `poetry-factory check` to list every problem
//! ```

use std::fmt;
use std::path::PathBuf;

/// Help lines shared by several errors.
pub mod suggestions {
    /// No pyproject.toml in the directory chain.
    pub const NO_MANIFEST: &str = "Run the command from a project directory, or pass `-C <dir>`";

    /// The manifest is not valid TOML.
    pub const FIX_SYNTAX: &str = "Check pyproject.toml for unbalanced brackets or quotes";

    /// `[tool.poetry]` is absent.
    pub const MISSING_SECTION: &str =
        "Add a [tool.poetry] table with `name`, `version` and `authors`";

    /// The section fails validation.
    pub const INVALID_CONFIG: &str = "Run `poetry-factory check` to list every problem";
}

/// Table every key path is relative to.
const SECTION: &str = "tool.poetry";

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Blocks loading or fails `check`
    Error,
    /// Reported by strict checks; never blocks
    Warning,
    /// A value that was accepted but ignored
    Note,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Note => "note",
        }
    }

    fn paint(self, color: bool) -> String {
        if !color {
            return self.label().to_string();
        }
        let code = match self {
            Severity::Error => "1;31",
            Severity::Warning => "1;33",
            Severity::Note => "1;36",
        };
        format!("\x1b[{}m{}\x1b[0m", code, self.label())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A problem with a manifest, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,

    /// Headline, without the key prefix
    pub message: String,

    /// Manifest the problem was found in
    pub manifest: Option<PathBuf>,

    /// Dotted key path below `[tool.poetry]`
    pub key: Option<String>,

    pub notes: Vec<String>,

    pub help: Vec<String>,
}

impl Diagnostic {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            message: message.into(),
            manifest: None,
            key: None,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn note(message: impl Into<String>) -> Self {
        Self::new(Severity::Note, message)
    }

    /// Build a diagnostic from a validation message.
    ///
    /// A leading `[dotted.path] ` prefix becomes the diagnostic's key.
    pub fn from_check_message(severity: Severity, message: &str) -> Self {
        match split_key(message) {
            Some((key, rest)) => Self::new(severity, rest).at_key(key),
            None => Self::new(severity, message),
        }
    }

    /// Name the manifest the problem was found in.
    pub fn in_manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest = Some(path.into());
        self
    }

    /// Point at a key below `[tool.poetry]`.
    pub fn at_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    /// Render for the terminal.
    pub fn format(&self, color: bool) -> String {
        let mut output = format!("{}: {}\n", self.severity.paint(color), self.message);

        let key = self.key.as_ref().map(|key| format!("{}.{}", SECTION, key));
        match (&self.manifest, key) {
            (Some(path), Some(key)) => {
                output.push_str(&format!("  --> {}: {}\n", path.display(), key))
            }
            (Some(path), None) => output.push_str(&format!("  --> {}\n", path.display())),
            (None, Some(key)) => output.push_str(&format!("  --> {}\n", key)),
            (None, None) => {}
        }

        for note in &self.notes {
            output.push_str(&format!("  = note: {}\n", note));
        }
        for help in &self.help {
            output.push_str(&format!("  = help: {}\n", help));
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Split `[a.b] message` into `("a.b", "message")`.
fn split_key(message: &str) -> Option<(&str, &str)> {
    let rest = message.strip_prefix('[')?;
    let (key, rest) = rest.split_once("] ")?;
    Some((key, rest))
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
