// src/cli/mod.rs
//! CLI definitions for debclosure
//!
//! This module contains the command-line interface definitions using clap.
//! The command implementations are in the `commands` module.
//!
//! - `resolve` - Resolve a plan into a pinned spec
//! - `spec-get` - Fetch the packages of a spec from a pool
//! - `install-order` - Show the install batches for a spec or package dir
//! - `completions` - Generate shell completions

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "debclosure")]
#[command(version)]
#[command(about = "Resolve Debian package plans into pinned specs", long_about = None)]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Pool selection shared by commands that talk to a pool
#[derive(Args, Debug, Clone)]
pub struct PoolArgs {
    /// Pool directory, or a name relative to the pool search path
    pub pool: PathBuf,

    /// Base directory for relative pool names
    #[arg(long, env = "FAB_POOL_PATH")]
    pub pool_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a plan and its dependencies into a spec
    Resolve {
        #[command(flatten)]
        pool: PoolArgs,

        /// Package names, or @FILE to read names from a plan file
        #[arg(required = true, value_name = "NAME|@PLAN")]
        plan: Vec<String>,

        /// Also write the spec to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail if a resolved version violates a dependency relation
        #[arg(long)]
        check_constraints: bool,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Directory under which work dirs are created
        #[arg(long, env = "FAB_TMPDIR")]
        tmpdir: Option<PathBuf>,
    },

    /// Fetch the packages listed in a spec
    SpecGet {
        #[command(flatten)]
        pool: PoolArgs,

        /// Spec file, or inline `name=version` lines
        spec: String,

        /// Directory to fetch into (created if missing)
        outdir: PathBuf,
    },

    /// Show the batches a spec or package directory installs in
    InstallOrder {
        /// Directory of .deb files, spec file, or inline spec
        target: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `name=version` lines
    Text,
    /// JSON object of name to version
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::try_parse_from([
            "debclosure",
            "resolve",
            "/srv/pool",
            "bash",
            "@plan.txt",
            "-o",
            "spec.txt",
            "--check-constraints",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Resolve {
                pool,
                plan,
                output,
                check_constraints,
                format,
                ..
            } => {
                assert_eq!(pool.pool, PathBuf::from("/srv/pool"));
                assert_eq!(plan, vec!["bash", "@plan.txt"]);
                assert_eq!(output, Some(PathBuf::from("spec.txt")));
                assert!(check_constraints);
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected resolve"),
        }
    }

    #[test]
    fn test_resolve_requires_plan() {
        assert!(Cli::try_parse_from(["debclosure", "resolve", "/srv/pool"]).is_err());
    }
}
