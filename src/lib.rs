// src/lib.rs

//! debclosure
//!
//! Resolves a plan of Debian package names into a pinned, transitively
//! complete package spec by walking the control metadata of packages fetched
//! from a package pool.
//!
//! # Architecture
//!
//! - Rounds: each resolution round fetches the outstanding packages into a
//!   fresh work dir and reads their `Depends`
//! - Alternatives: the first alternative present in the pool wins, the
//!   last-listed one otherwise
//! - Virtual packages: a fixed alias table maps virtual names to real ones
//! - Pools: accessed through the `PoolClient` trait; `CommandPool` runs the
//!   `pool-exists` and `pool-get` tools
//!
//! # Example
//!
//! ```no_run
//! use debclosure::packages::DebArchiveSource;
//! use debclosure::pool::{CommandPool, PoolConfig};
//! use debclosure::resolver::{Resolver, ResolverOptions};
//!
//! let pool = CommandPool::new(PoolConfig::locate("/srv/pools/main", None)?);
//! let mut resolver = Resolver::new(pool, DebArchiveSource::new(), ResolverOptions::default());
//! let spec = resolver.resolve_plan(["bash", "awk"])?;
//! println!("{}", spec);
//! # Ok::<(), debclosure::Error>(())
//! ```

pub mod compression;
pub mod config;
pub mod dependencies;
mod error;
pub mod packages;
pub mod pool;
pub mod resolver;
pub mod spec;
pub mod version;

pub use dependencies::{DependencyGroup, PackageConstraint, Relation};
pub use error::{Error, Result};
pub use packages::{DebArchiveSource, MetadataSource, PackageMetadata};
pub use pool::{CommandPool, PoolClient, PoolConfig};
pub use resolver::{InstallBatches, Resolver, ResolverOptions};
pub use spec::PackageSpec;
pub use version::{DebVersion, DebianVersionComparator, VersionComparator};
