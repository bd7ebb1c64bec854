//! `poetry-factory check` command

use anyhow::{bail, Result};

use crate::cli::CheckArgs;
use poetry_factory::core::PyProject;
use poetry_factory::ops::validate;
use poetry_factory::util::diagnostic::{emit, Diagnostic, Severity};
use poetry_factory::util::GlobalContext;

pub fn execute(args: CheckArgs, ctx: &GlobalContext) -> Result<()> {
    let manifest_path = ctx.find_manifest()?;
    let root = manifest_path.parent().unwrap_or(ctx.cwd());
    let config = ctx.load_config(root);

    let strict = args.strict().unwrap_or(config.strict());
    let warnings_as_errors = args.warnings_as_errors || config.warnings_as_errors();

    let pyproject = PyProject::load(&manifest_path)?;
    let result = validate(pyproject.poetry_config()?, strict)?;

    let problems = result
        .errors
        .iter()
        .map(|message| (Severity::Error, message))
        .chain(result.warnings.iter().map(|message| (Severity::Warning, message)));
    for (severity, message) in problems {
        let diag = Diagnostic::from_check_message(severity, message).in_manifest(&manifest_path);
        emit(&diag, ctx.color());
    }

    if !result.is_valid() {
        bail!(
            "{} has {} error(s)",
            manifest_path.display(),
            result.errors.len()
        );
    }
    if warnings_as_errors && !result.warnings.is_empty() {
        bail!(
            "{} has {} warning(s) and warnings are treated as errors",
            manifest_path.display(),
            result.warnings.len()
        );
    }

    println!("All set!");
    Ok(())
}
