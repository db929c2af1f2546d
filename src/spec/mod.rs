// src/spec/mod.rs

//! Pinned package specifications
//!
//! A spec maps package names to exact versions and is stored as one
//! `name=version` line per package:
//!
//! ```text
//! # base system
//! bash=4.1-3
//! mawk=1.3.3-11
//! ```
//!
//! Versions are kept in the form pool artifact filenames use, so a leading
//! `epoch:` is dropped on the way in.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// Name to version mapping, ordered by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageSpec {
    packages: BTreeMap<String, String>,
}

/// Drop a well-formed `digits:` epoch from a version
///
/// ```
/// use debclosure::spec::strip_epoch;
///
/// assert_eq!(strip_epoch("1:2.0-1"), "2.0-1");
/// assert_eq!(strip_epoch("2.0-1"), "2.0-1");
/// assert_eq!(strip_epoch("x:2.0"), "x:2.0");
/// ```
pub fn strip_epoch(version: &str) -> &str {
    match version.split_once(':') {
        Some((epoch, rest)) if !epoch.is_empty() && epoch.bytes().all(|b| b.is_ascii_digit()) => {
            rest
        }
        _ => version,
    }
}

impl PackageSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a package
    pub fn add(&mut self, name: impl Into<String>, version: &str) {
        self.packages
            .insert(name.into(), strip_epoch(version).to_string());
    }

    /// Insert a package unless it is already pinned
    ///
    /// Returns `true` if the entry was added.
    pub fn pin(&mut self, name: &str, version: &str) -> bool {
        if self.packages.contains_key(name) {
            return false;
        }
        self.add(name, version);
        true
    }

    /// All entries as `name=version` (bare `name` when no version is known)
    pub fn get(&self) -> Vec<String> {
        self.packages
            .iter()
            .map(|(name, version)| {
                if version.is_empty() {
                    name.clone()
                } else {
                    format!("{}={}", name, version)
                }
            })
            .collect()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    pub fn version(&self, name: &str) -> Option<&str> {
        self.packages.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.packages
            .iter()
            .map(|(name, version)| (name.as_str(), version.as_str()))
    }

    /// Add entries from a spec file, or from raw text if `source` is not a file
    pub fn read(&mut self, source: &str) -> Result<()> {
        let path = Path::new(source);
        if path.is_file() {
            debug!("Reading spec from {}", path.display());
            let text = fs::read_to_string(path)?;
            self.read_str(&text);
        } else {
            self.read_str(source);
        }
        Ok(())
    }

    /// Add entries from newline-separated `name=version` text
    ///
    /// `#` starts a comment. Lines that don't name a package are skipped.
    pub fn read_str(&mut self, text: &str) {
        for line in text.lines() {
            let entry = line.split('#').next().unwrap_or_default().trim();
            if entry.is_empty() {
                continue;
            }

            let (name, version) = match entry.split_once('=') {
                Some((name, version)) => (name.trim(), version.trim()),
                None => (entry, ""),
            };
            if name.is_empty() {
                warn!("Skipping spec entry without a name: {}", entry);
                continue;
            }

            self.add(name, version);
        }
    }

    /// Write the spec as text to any writer
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for entry in self.get() {
            writeln!(writer, "{}", entry)?;
        }
        Ok(())
    }

    /// Write the spec to a file
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Print the spec to stdout, and to `output` when given
    pub fn print_spec(&self, output: Option<&Path>) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_to(&mut handle)?;
        handle.flush()?;

        if let Some(path) = output {
            self.write(path)?;
            debug!("Wrote spec to {}", path.display());
        }
        Ok(())
    }
}

impl FromStr for PackageSpec {
    type Err = Infallible;

    fn from_str(text: &str) -> std::result::Result<Self, Self::Err> {
        let mut spec = Self::new();
        spec.read_str(text);
        Ok(spec)
    }
}

impl fmt::Display for PackageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_add_and_get() {
        let mut spec = PackageSpec::new();
        spec.add("mawk", "1.3.3-11");
        spec.add("bash", "4.1-3");
        assert_eq!(spec.get(), vec!["bash=4.1-3", "mawk=1.3.3-11"]);
        assert!(spec.exists("bash"));
        assert!(!spec.exists("zsh"));
        assert_eq!(spec.version("mawk"), Some("1.3.3-11"));
    }

    #[test]
    fn test_add_overwrites_pin_does_not() {
        let mut spec = PackageSpec::new();
        spec.add("bash", "4.0");
        spec.add("bash", "4.1");
        assert_eq!(spec.version("bash"), Some("4.1"));

        assert!(!spec.pin("bash", "5.0"));
        assert!(spec.pin("dash", "0.5"));
        assert_eq!(spec.version("bash"), Some("4.1"));
        assert_eq!(spec.len(), 2);
    }

    #[test]
    fn test_epoch_stripped() {
        let mut spec = PackageSpec::new();
        spec.add("perl", "1:5.8.8-7");
        assert_eq!(spec.get(), vec!["perl=5.8.8-7"]);
    }

    #[test]
    fn test_read_str() {
        let spec: PackageSpec = "\
# comment line
bash=4.1-3   # trailing comment

  mawk = 1:1.3.3-11
base-files
=orphan
"
        .parse()
        .unwrap();

        assert_eq!(
            spec.get(),
            vec!["base-files", "bash=4.1-3", "mawk=1.3.3-11"]
        );
        assert_eq!(spec.version("base-files"), Some(""));
    }

    #[test]
    fn test_read_from_file_or_text() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("spec");
        fs::write(&path, "bash=4.1-3\n").unwrap();

        let mut spec = PackageSpec::new();
        spec.read(path.to_str().unwrap()).unwrap();
        spec.read("mawk=1.3.3-11\ndash=0.5").unwrap();
        assert_eq!(spec.len(), 3);
    }

    #[test]
    fn test_write_then_read() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("spec.txt");

        let mut spec = PackageSpec::new();
        spec.add("bash", "4.1-3");
        spec.add("perl", "1:5.8.8-7");
        spec.add("base-files", "");
        spec.write(&path).unwrap();

        let mut reread = PackageSpec::new();
        reread.read(path.to_str().unwrap()).unwrap();
        assert_eq!(reread, spec);
    }

    #[test]
    fn test_display_and_json() {
        let mut spec = PackageSpec::new();
        spec.add("bash", "4.1-3");
        spec.add("mawk", "1.3.3-11");
        assert_eq!(spec.to_string(), "bash=4.1-3\nmawk=1.3.3-11");

        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"bash":"4.1-3","mawk":"1.3.3-11"}"#);
        let back: PackageSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}
