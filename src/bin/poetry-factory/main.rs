//! poetry-factory CLI - build and check Poetry project packages

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use poetry_factory::util::diagnostic;
use poetry_factory::{GlobalContext, ManifestError};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ManifestError>() {
            Some(err) => diagnostic::emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("poetry_factory=debug")
    } else {
        EnvFilter::new("poetry_factory=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let mut ctx = match cli.directory {
        Some(dir) => GlobalContext::with_cwd(dir)?,
        None => GlobalContext::new()?,
    };
    ctx.set_color(!cli.no_color);

    // Execute command
    match cli.command {
        Commands::Locate => commands::locate::execute(&ctx),
        Commands::Check(args) => commands::check::execute(args, &ctx),
        Commands::Show(args) => commands::show::execute(args, &ctx),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
