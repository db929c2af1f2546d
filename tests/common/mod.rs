// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use debclosure::pool::PoolClient;
use debclosure::resolver::ResolverOptions;
use debclosure::spec::strip_epoch;
use debclosure::{Error, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a minimal `.deb` whose control paragraph names `name`, `version`
/// and `depends` (omitted when empty).
pub fn build_deb(dir: &Path, name: &str, version: &str, depends: &str) -> PathBuf {
    let mut control = format!("Package: {}\nVersion: {}\nArchitecture: all\n", name, version);
    if !depends.is_empty() {
        control.push_str(&format!("Depends: {}\n", depends));
    }
    control.push_str("Description: test package\n generated for integration tests\n");

    let mut tarball = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    let mut header = tar::Header::new_gnu();
    header.set_size(control.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    tarball
        .append_data(&mut header, "./control", control.as_bytes())
        .unwrap();
    let control_tar = tarball.into_inner().unwrap().finish().unwrap();

    let path = dir.join(format!("{}_{}_all.deb", name, strip_epoch(version)));
    let mut archive = ar::Builder::new(File::create(&path).unwrap());
    for (member, data) in [
        ("debian-binary", b"2.0\n".to_vec()),
        ("control.tar.gz", control_tar),
        ("data.tar.gz", Vec::new()),
    ] {
        let header = ar::Header::new(member.as_bytes().to_vec(), data.len() as u64);
        archive.append(&header, data.as_slice()).unwrap();
    }
    path
}

/// In-memory pool that materializes real `.deb` files on fetch
#[derive(Default)]
pub struct FakePool {
    packages: BTreeMap<String, (String, String)>,
    pub fetches: RefCell<Vec<Vec<String>>>,
    pub probes: RefCell<Vec<String>>,
}

impl FakePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package with its version and raw `Depends` field
    pub fn with(mut self, name: &str, version: &str, depends: &str) -> Self {
        self.packages
            .insert(name.to_string(), (version.to_string(), depends.to_string()));
        self
    }
}

impl PoolClient for FakePool {
    fn exists(&self, name: &str) -> Result<bool> {
        self.probes.borrow_mut().push(name.to_string());
        Ok(self.packages.contains_key(name))
    }

    fn fetch(&self, names: &[String], dest: &Path) -> Result<()> {
        self.fetches.borrow_mut().push(names.to_vec());

        for entry in names {
            let name = entry.split_once('=').map_or(entry.as_str(), |(name, _)| name);
            let Some((version, depends)) = self.packages.get(name) else {
                return Err(Error::PoolFetch {
                    names: names.to_vec(),
                    dest: dest.to_path_buf(),
                    diagnostic: format!("package not found: {}", name),
                });
            };
            build_deb(dest, name, version, depends);
        }
        Ok(())
    }
}

/// Resolver options rooted in a temporary directory.
///
/// Returns (TempDir, options) - keep the TempDir alive to prevent cleanup.
pub fn temp_options(enforce_constraints: bool) -> (TempDir, ResolverOptions) {
    let temp_dir = tempfile::tempdir().unwrap();
    let options = ResolverOptions {
        workdir_root: temp_dir.path().to_path_buf(),
        enforce_constraints,
    };
    (temp_dir, options)
}
