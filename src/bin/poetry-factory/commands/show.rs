//! `poetry-factory show` command

use anyhow::{Context, Result};

use crate::cli::ShowArgs;
use poetry_factory::core::{Project, ProjectPackage};
use poetry_factory::ops::create_project;
use poetry_factory::util::diagnostic::{emit, Diagnostic};
use poetry_factory::util::GlobalContext;

pub fn execute(args: ShowArgs, ctx: &GlobalContext) -> Result<()> {
    let project = create_project(Some(ctx.cwd()))?;
    let package = project.package();

    if let Some(note) = ignored_license(&project) {
        emit(&note, ctx.color());
    }

    if args.json {
        let json = serde_json::to_string_pretty(package).context("failed to serialize package")?;
        println!("{}", json);
    } else {
        print_package(package);
    }

    Ok(())
}

/// Note a `license` that did not resolve to a known SPDX identifier.
fn ignored_license(project: &Project) -> Option<Diagnostic> {
    if project.package().license().is_some() {
        return None;
    }
    let id = project.local_config().get("license")?.as_str()?;

    Some(
        Diagnostic::note(format!("license `{}` is not a recognized SPDX identifier", id))
            .in_manifest(project.file())
            .at_key("license")
            .with_note("the package is loaded without a license"),
    )
}

fn print_package(package: &ProjectPackage) {
    println!("{}", package);

    if let Some(description) = package.description() {
        println!("  description: {}", description);
    }
    if let Some(license) = package.license() {
        println!("  license: {}", license.id);
    }
    if let Some(python) = package.python_versions() {
        println!("  python: {}", python);
    }
    println!("  root: {}", package.root_dir().display());

    let main: Vec<_> = package.dependencies().collect();
    if !main.is_empty() {
        println!("\ndependencies:");
        for dep in main {
            println!("  {}", dep);
        }
    }

    let dev: Vec<_> = package.dev_dependencies().collect();
    if !dev.is_empty() {
        println!("\ndev-dependencies:");
        for dep in dev {
            println!("  {}", dep);
        }
    }

    if !package.extras().is_empty() {
        println!("\nextras:");
        for (extra, deps) in package.extras() {
            let names: Vec<_> = deps.iter().map(|d| d.name()).collect();
            println!("  {}: {}", extra, names.join(", "));
        }
    }
}
