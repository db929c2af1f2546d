// src/resolver/plan.rs

//! Install ordering for a resolved spec
//!
//! Kernel images (`linux-image*`) have to be installed before the rest of the
//! system, so a spec is installed in two batches.

use crate::dependencies::is_preinstall;
use crate::error::Result;
use crate::packages::ArtifactName;
use crate::spec::PackageSpec;
use std::fs;
use std::path::Path;

/// Package names split into install batches, each sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallBatches {
    pub preinstall: Vec<String>,
    pub general: Vec<String>,
}

impl InstallBatches {
    /// Split the names pinned in `spec`
    pub fn from_spec(spec: &PackageSpec) -> Self {
        Self::from_names(spec.names().map(str::to_string))
    }

    /// Split the names of the `.deb` artifacts in `dir`
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let filename = entry.file_name();
            let Some(filename) = filename.to_str() else {
                continue;
            };
            if ArtifactName::is_artifact(filename) {
                names.push(ArtifactName::parse(filename)?.name);
            }
        }
        Ok(Self::from_names(names))
    }

    fn from_names(names: impl IntoIterator<Item = String>) -> Self {
        let (mut preinstall, mut general): (Vec<_>, Vec<_>) =
            names.into_iter().partition(|name| is_preinstall(name));
        preinstall.sort();
        preinstall.dedup();
        general.sort();
        general.dedup();
        Self {
            preinstall,
            general,
        }
    }

    /// Batches in install order, skipping empty ones
    pub fn batches(&self) -> impl Iterator<Item = &[String]> {
        [self.preinstall.as_slice(), self.general.as_slice()]
            .into_iter()
            .filter(|batch| !batch.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.preinstall.is_empty() && self.general.is_empty()
    }
}

/// Something that can install a batch of packages into a target root
///
/// The chroot/apt installer lives outside this crate.
pub trait Installer {
    fn install_batch(&mut self, names: &[String]) -> Result<()>;

    /// Install every batch in order
    fn install_all(&mut self, batches: &InstallBatches) -> Result<()> {
        for batch in batches.batches() {
            self.install_batch(batch)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingInstaller {
        batches: Vec<Vec<String>>,
    }

    impl Installer for RecordingInstaller {
        fn install_batch(&mut self, names: &[String]) -> Result<()> {
            self.batches.push(names.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_from_spec() {
        let spec: PackageSpec = "zsh=5\nlinux-image-2.6=1\nbash=4\nlinux-image=2\n"
            .parse()
            .unwrap();
        let batches = InstallBatches::from_spec(&spec);
        assert_eq!(batches.preinstall, vec!["linux-image", "linux-image-2.6"]);
        assert_eq!(batches.general, vec!["bash", "zsh"]);
    }

    #[test]
    fn test_from_dir() {
        let tmp = TempDir::new().unwrap();
        for name in ["mawk_1.3_i386.deb", "linux-image-3.2_3.2-1_i386.deb", "README"] {
            fs::write(tmp.path().join(name), "").unwrap();
        }
        let batches = InstallBatches::from_dir(tmp.path()).unwrap();
        assert_eq!(batches.preinstall, vec!["linux-image-3.2"]);
        assert_eq!(batches.general, vec!["mawk"]);
    }

    #[test]
    fn test_installer_order_skips_empty() {
        let spec: PackageSpec = "bash=4\ndash=1\n".parse().unwrap();
        let mut installer = RecordingInstaller::default();
        installer.install_all(&InstallBatches::from_spec(&spec)).unwrap();
        assert_eq!(installer.batches, vec![vec!["bash".to_string(), "dash".to_string()]]);
    }
}
