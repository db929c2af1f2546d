// src/packages/deb.rs

//! Control metadata from Debian binary packages
//!
//! A `.deb` is an ar archive holding `debian-binary`, a `control.tar*`
//! member and a `data.tar*` member. Only the `control` file inside the
//! control tarball is read.

use super::control::ControlFields;
use super::traits::MetadataSource;
use crate::compression::{create_decoder, CompressionFormat};
use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tar::Archive;
use tracing::debug;

const CONTROL_MEMBER_PREFIX: &str = "control.tar";
const CONTROL_FILE: &str = "control";

/// Reads control fields straight out of `.deb` archives on disk
#[derive(Debug, Clone, Copy, Default)]
pub struct DebArchiveSource;

impl DebArchiveSource {
    pub fn new() -> Self {
        Self
    }

    /// Find the control tarball in the ar archive and return the text of its
    /// `control` file
    fn control_text(path: &Path) -> Result<String> {
        let file = File::open(path).map_err(|e| Error::metadata(path, e.to_string()))?;
        let mut archive = ar::Archive::new(file);

        while let Some(entry) = archive.next_entry() {
            let entry = entry.map_err(|e| Error::metadata(path, e.to_string()))?;
            let member = String::from_utf8_lossy(entry.header().identifier()).to_string();
            // GNU ar terminates member names with '/'
            let member = member.trim_end_matches('/');

            if !member.starts_with(CONTROL_MEMBER_PREFIX) {
                continue;
            }

            let format = CompressionFormat::from_member_name(member)
                .map_err(|e| Error::metadata(path, e.to_string()))?;
            debug!("Reading {} ({}) from {}", member, format, path.display());

            let decoder =
                create_decoder(entry, format).map_err(|e| Error::metadata(path, e.to_string()))?;
            return Self::control_from_tar(decoder, path);
        }

        Err(Error::metadata(path, "no control.tar member"))
    }

    fn control_from_tar<R: Read>(reader: R, path: &Path) -> Result<String> {
        let mut tarball = Archive::new(reader);
        let entries = tarball
            .entries()
            .map_err(|e| Error::metadata(path, e.to_string()))?;

        for entry in entries {
            let mut entry = entry.map_err(|e| Error::metadata(path, e.to_string()))?;
            let is_control = entry
                .path()
                .map(|p| p.file_name().is_some_and(|n| n == CONTROL_FILE))
                .unwrap_or(false);
            if !is_control {
                continue;
            }

            let mut text = String::new();
            entry
                .read_to_string(&mut text)
                .map_err(|e| Error::metadata(path, e.to_string()))?;
            return Ok(text);
        }

        Err(Error::metadata(path, "control tarball has no control file"))
    }
}

impl MetadataSource for DebArchiveSource {
    fn read_control(&self, path: &Path) -> Result<ControlFields> {
        let text = Self::control_text(path)?;
        ControlFields::parse(&text).map_err(|e| Error::metadata(path, e.to_string()))
    }
}
