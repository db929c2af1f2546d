// src/commands/resolve.rs
//! Plan resolution command

use super::open_pool;
use crate::cli::{OutputFormat, PoolArgs};
use anyhow::{Context, Result};
use debclosure::config::Config;
use debclosure::packages::DebArchiveSource;
use debclosure::resolver::Resolver;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Arguments of `debclosure resolve`
pub struct ResolveArgs {
    pub pool: PoolArgs,
    pub plan: Vec<String>,
    pub output: Option<PathBuf>,
    pub check_constraints: bool,
    pub format: OutputFormat,
    pub tmpdir: Option<PathBuf>,
}

/// Expand `@FILE` arguments into the package names listed in the file
///
/// Plan files list names separated by whitespace; `#` starts a comment.
pub fn expand_plan(args: &[String]) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for arg in args {
        match arg.strip_prefix('@') {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read plan {}", path))?;
                for line in text.lines() {
                    let line = line.split('#').next().unwrap_or_default();
                    names.extend(line.split_whitespace().map(str::to_string));
                }
            }
            None => names.push(arg.clone()),
        }
    }
    Ok(names)
}

pub fn cmd_resolve(args: ResolveArgs, config: &Config) -> Result<()> {
    let pool = open_pool(&args.pool, config)?;
    let plan = expand_plan(&args.plan)?;
    info!("Resolving plan of {} packages", plan.len());

    let mut options = config.resolver_options();
    if let Some(tmpdir) = args.tmpdir {
        options.workdir_root = tmpdir;
    }
    options.enforce_constraints |= args.check_constraints;

    let mut resolver = Resolver::new(pool, DebArchiveSource::new(), options);
    let spec = resolver
        .resolve_plan(&plan)
        .context("Plan resolution failed")?;

    let output = args.output.or_else(|| config.output.path.clone());
    match args.format {
        OutputFormat::Text => spec.print_spec(output.as_deref())?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&spec)?;
            println!("{}", json);
            if let Some(path) = output {
                fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }
    }

    Ok(())
}
