//! `poetry-factory locate` command

use anyhow::Result;

use poetry_factory::util::GlobalContext;

pub fn execute(ctx: &GlobalContext) -> Result<()> {
    let manifest_path = ctx.find_manifest()?;
    println!("{}", manifest_path.display());
    Ok(())
}
