// src/commands/spec.rs
//! Spec fetching command

use super::open_pool;
use crate::cli::PoolArgs;
use anyhow::{Context, Result};
use debclosure::config::Config;
use debclosure::pool::fetch_spec;
use debclosure::spec::PackageSpec;
use std::path::Path;
use tracing::info;

/// Fetch every package of a spec into `outdir`
pub fn cmd_spec_get(pool: &PoolArgs, spec: &str, outdir: &Path, config: &Config) -> Result<()> {
    let client = open_pool(pool, config)?;

    let mut packages = PackageSpec::new();
    packages.read(spec).context("Failed to read spec")?;
    if packages.is_empty() {
        info!("Spec is empty, nothing to fetch");
        return Ok(());
    }

    fetch_spec(&client, &packages, outdir)
        .with_context(|| format!("Failed to fetch spec into {}", outdir.display()))?;
    println!("Fetched {} packages into {}", packages.len(), outdir.display());
    Ok(())
}
