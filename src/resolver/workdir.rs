// src/resolver/workdir.rs

//! Per-round working directories
//!
//! Every resolution round fetches into a brand new directory named after the
//! current time, `fab-YYYYmmdd.HHMMSS.mmm`. Directories are never reused and
//! never removed.

use crate::error::Result;
use chrono::Local;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_WORKDIR_ROOT: &str = "/var/tmp";
pub const WORKDIR_PREFIX: &str = "fab-";

/// Create a fresh, uniquely named directory under `root`
///
/// If the timestamped name is taken (two rounds in the same millisecond),
/// `-1`, `-2`, ... is appended until creation succeeds.
pub fn create_workdir(root: &Path) -> Result<PathBuf> {
    fs::create_dir_all(root)?;

    let stamp = Local::now().format("%Y%m%d.%H%M%S.%3f");
    let base = format!("{}{}", WORKDIR_PREFIX, stamp);

    let mut attempt = 0u32;
    loop {
        let name = if attempt == 0 {
            base.clone()
        } else {
            format!("{}-{}", base, attempt)
        };
        let path = root.join(name);

        match fs::create_dir(&path) {
            Ok(()) => {
                debug!("Created work dir {}", path.display());
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e.into()),
        }
    }
}
