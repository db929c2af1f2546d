// src/commands/mod.rs
//! Command handlers for the debclosure CLI

mod install_order;
mod resolve;
mod spec;

pub use install_order::cmd_install_order;
pub use resolve::{cmd_resolve, ResolveArgs};
pub use spec::cmd_spec_get;

use crate::cli::PoolArgs;
use anyhow::{Context, Result};
use debclosure::config::Config;
use debclosure::pool::CommandPool;
use std::path::Path;

/// Load the config file if one was given, defaults otherwise
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

/// Locate the pool named on the command line and build a client for it
fn open_pool(args: &PoolArgs, config: &Config) -> Result<CommandPool> {
    let pool = config
        .locate_pool(&args.pool, args.pool_path.as_deref())
        .with_context(|| format!("Cannot use pool {}", args.pool.display()))?;
    Ok(CommandPool::new(pool))
}
