// src/error.rs

//! Error types for plan resolution
//!
//! Every failure aborts the in-flight resolution; there is no local recovery.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using debclosure's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving a plan or handling a spec
#[derive(Error, Debug)]
pub enum Error {
    /// Pool location missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Config file could not be read or parsed
    #[error("Config file error: {0}")]
    Config(String),

    /// Bulk fetch from the pool failed
    #[error("Pool fetch of [{}] into {} failed: {diagnostic}", .names.join(", "), .dest.display())]
    PoolFetch {
        names: Vec<String>,
        dest: PathBuf,
        diagnostic: String,
    },

    /// Control metadata could not be read or was malformed
    #[error("Failed to read metadata from {}: {reason}", .path.display())]
    MetadataRead { path: PathBuf, reason: String },

    /// A concrete version fails its declared relation
    #[error("Dependency version error: {constraint} not satisfied by version {actual}")]
    VersionConstraint { constraint: String, actual: String },

    /// Version string that isn't a well-formed Debian version
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    /// Relation token outside the Debian relation set
    #[error("Invalid version relation: {0}")]
    InvalidRelation(String),

    /// Artifact file name doesn't follow <name>_<version>_<arch>.deb
    #[error("Not a package: `{0}'")]
    MalformedFilename(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a metadata error for the given artifact path
    pub fn metadata(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::MetadataRead {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
