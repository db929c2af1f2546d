// src/commands/install_order.rs
//! Install batch listing

use anyhow::{Context, Result};
use debclosure::resolver::InstallBatches;
use debclosure::spec::PackageSpec;
use std::path::Path;

/// Print the preinstall and general batches of a package dir or spec
pub fn cmd_install_order(target: &str) -> Result<()> {
    let path = Path::new(target);
    let batches = if path.is_dir() {
        InstallBatches::from_dir(path)
            .with_context(|| format!("Failed to scan {}", path.display()))?
    } else {
        let mut spec = PackageSpec::new();
        spec.read(target).context("Failed to read spec")?;
        InstallBatches::from_spec(&spec)
    };

    if batches.is_empty() {
        println!("Nothing to install.");
        return Ok(());
    }

    if !batches.preinstall.is_empty() {
        println!("preinstall: {}", batches.preinstall.join(" "));
    }
    if !batches.general.is_empty() {
        println!("general: {}", batches.general.join(" "));
    }
    Ok(())
}
