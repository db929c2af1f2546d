// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use commands::ResolveArgs;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so the spec on stdout stays machine readable
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Resolve {
            pool,
            plan,
            output,
            check_constraints,
            format,
            tmpdir,
        } => commands::cmd_resolve(
            ResolveArgs {
                pool,
                plan,
                output,
                check_constraints,
                format,
                tmpdir,
            },
            &config,
        ),
        Commands::SpecGet { pool, spec, outdir } => {
            commands::cmd_spec_get(&pool, &spec, &outdir, &config)
        }
        Commands::InstallOrder { target } => commands::cmd_install_order(&target),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "debclosure", &mut io::stdout());
            Ok(())
        }
    }
}
