// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Build {
            recipe,
            workdir,
            output,
            source_cache,
            shared,
            no_pic,
            target_os,
            compiler,
            runtime,
        } => commands::cmd_build(
            &recipe,
            &workdir,
            &output,
            source_cache.as_deref(),
            shared,
            no_pic,
            target_os.as_deref(),
            compiler.as_deref(),
            runtime.as_deref(),
        ),
        Commands::Patch {
            recipe,
            root,
            dry_run,
        } => commands::cmd_patch(&recipe, &root, dry_run),
        Commands::Manifest {
            recipe,
            target_os,
            json,
        } => commands::cmd_manifest(&recipe, &target_os, json),
        Commands::Deps { recipe } => commands::cmd_deps(&recipe),
    }
}
