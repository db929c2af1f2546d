// src/packages/filename.rs

//! Pool artifact filenames
//!
//! Artifacts fetched from a pool are named `<name>_<version>_<arch>.deb`.
//! Pool filenames never carry an epoch.

use crate::error::{Error, Result};
use std::fmt;

const DEB_SUFFIX: &str = ".deb";

/// The fields encoded in a `.deb` filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactName {
    pub name: String,
    pub version: String,
    /// Empty when the filename has only two fields
    pub arch: String,
}

impl ArtifactName {
    /// Split a filename into name, version and architecture
    ///
    /// # Examples
    /// ```
    /// use debclosure::packages::ArtifactName;
    ///
    /// let artifact = ArtifactName::parse("bash_4.1-3_i386.deb").unwrap();
    /// assert_eq!(artifact.name, "bash");
    /// assert_eq!(artifact.version, "4.1-3");
    /// assert!(ArtifactName::parse("bash.tar.gz").is_err());
    /// ```
    pub fn parse(filename: &str) -> Result<Self> {
        let malformed = || Error::MalformedFilename(filename.to_string());

        let stem = filename.strip_suffix(DEB_SUFFIX).ok_or_else(malformed)?;
        let mut fields = stem.split('_');

        let name = fields.next().filter(|n| !n.is_empty()).ok_or_else(malformed)?;
        let version = fields.next().filter(|v| !v.is_empty()).ok_or_else(malformed)?;
        let arch = fields.next().unwrap_or_default();

        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
            arch: arch.to_string(),
        })
    }

    /// Whether a directory entry looks like a package artifact
    pub fn is_artifact(filename: &str) -> bool {
        filename.ends_with(DEB_SUFFIX)
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.arch.is_empty() {
            write!(f, "{}_{}{}", self.name, self.version, DEB_SUFFIX)
        } else {
            write!(f, "{}_{}_{}{}", self.name, self.version, self.arch, DEB_SUFFIX)
        }
    }
}
