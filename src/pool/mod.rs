// src/pool/mod.rs

//! Package pool access
//!
//! A pool is a directory (marked by a `.pool` subdirectory) that can answer
//! two questions: does a package exist, and fetch these packages into a
//! directory. The resolver talks to it through the [`PoolClient`] trait;
//! [`CommandPool`] is the production client that shells out to the pool
//! tools.

pub mod command;

pub use command::CommandPool;

use crate::error::{Error, Result};
use crate::spec::PackageSpec;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Marker directory that identifies a pool
pub const POOL_MARKER: &str = ".pool";

/// Existence probe and bulk fetch against a package pool
pub trait PoolClient {
    /// Whether the pool can provide a package with this name
    ///
    /// Errors are reserved for problems with the client itself (e.g. the
    /// probe could not be started); a missing package is `Ok(false)`.
    fn exists(&self, name: &str) -> Result<bool>;

    /// Fetch `names` into `dest`
    ///
    /// Each entry is either a bare name or `name=version`. Any failure is a
    /// [`Error::PoolFetch`].
    fn fetch(&self, names: &[String], dest: &Path) -> Result<()>;
}

impl<T: PoolClient + ?Sized> PoolClient for &T {
    fn exists(&self, name: &str) -> Result<bool> {
        (**self).exists(name)
    }

    fn fetch(&self, names: &[String], dest: &Path) -> Result<()> {
        (**self).fetch(names, dest)
    }
}

/// Location of a pool on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    path: PathBuf,
}

impl PoolConfig {
    /// Locate a pool
    ///
    /// A relative `pool` is joined onto `search_path` when one is given.
    /// The resulting directory must contain a `.pool` marker.
    pub fn locate(pool: impl AsRef<Path>, search_path: Option<&Path>) -> Result<Self> {
        let pool = pool.as_ref();
        let path = match search_path {
            Some(base) if pool.is_relative() => base.join(pool),
            _ => pool.to_path_buf(),
        };

        if !path.join(POOL_MARKER).is_dir() {
            return Err(Error::Configuration(format!(
                "pool does not exist: {}",
                path.display()
            )));
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Fetch every package pinned in `spec` into `outdir`
///
/// `outdir` is created if it does not exist yet.
pub fn fetch_spec<P: PoolClient>(pool: &P, spec: &PackageSpec, outdir: &Path) -> Result<()> {
    if !outdir.is_dir() {
        fs::create_dir_all(outdir)?;
    }

    let entries = spec.get();
    info!("Fetching {} packages into {}", entries.len(), outdir.display());
    pool.fetch(&entries, outdir)
}
