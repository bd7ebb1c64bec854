//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// poetry-factory - Inspect and validate the [tool.poetry] section of a pyproject.toml
#[derive(Parser)]
#[command(name = "poetry-factory")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Run as if started in <DIR> instead of the current directory
    #[arg(
        short = 'C',
        long = "directory",
        global = true,
        value_name = "DIR",
        env = "POETRY_FACTORY_DIRECTORY"
    )]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the path of the pyproject.toml in use
    Locate,

    /// Validate the [tool.poetry] section
    Check(CheckArgs),

    /// Show the project package
    Show(ShowArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct CheckArgs {
    /// Run the strict checks (default, unless disabled in config)
    #[arg(long, overrides_with = "no_strict")]
    pub strict: bool,

    /// Only check the section against the schema
    #[arg(long, overrides_with = "strict")]
    pub no_strict: bool,

    /// Fail when warnings are reported
    #[arg(long)]
    pub warnings_as_errors: bool,
}

impl CheckArgs {
    /// The strict setting given on the command line, if any.
    pub fn strict(&self) -> Option<bool> {
        match (self.strict, self.no_strict) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(Args)]
pub struct ShowArgs {
    /// Print the package as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
