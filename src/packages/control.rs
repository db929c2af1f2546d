// src/packages/control.rs

//! Debian control paragraphs
//!
//! A control file is a single RFC 822 style paragraph:
//!
//! ```text
//! Package: bash
//! Version: 4.1-3
//! Depends: base-files (>= 2.1.12), debianutils (>= 2.15)
//! Description: GNU Bourne Again SHell
//!  Bash is an sh-compatible command language interpreter.
//! ```
//!
//! Parsing is done by `rfc822_like`; only the fields the resolver cares
//! about are kept, everything else in the paragraph is ignored.

use crate::dependencies::{parse_depends, DependencyGroup};
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const FIELD_PACKAGE: &str = "Package";
pub const FIELD_VERSION: &str = "Version";
pub const FIELD_ARCHITECTURE: &str = "Architecture";
pub const FIELD_DEPENDS: &str = "Depends";
pub const FIELD_PRE_DEPENDS: &str = "Pre-Depends";

/// A control file that could not be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlParseError {
    #[error("malformed control paragraph: {0}")]
    Malformed(String),
    #[error("control file has no paragraph")]
    Empty,
}

/// The fields of one control paragraph
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ControlFields {
    #[serde(rename = "Package", default)]
    pub package: Option<String>,
    #[serde(rename = "Version", default)]
    pub version: Option<String>,
    #[serde(rename = "Architecture", default)]
    pub architecture: Option<String>,
    #[serde(rename = "Depends", default)]
    pub depends: Option<String>,
    #[serde(rename = "Pre-Depends", default)]
    pub pre_depends: Option<String>,
}

impl ControlFields {
    /// Parse the first paragraph of a control file
    pub fn parse(text: &str) -> std::result::Result<Self, ControlParseError> {
        let paragraphs: Vec<ControlFields> = rfc822_like::from_str(text)
            .map_err(|e| ControlParseError::Malformed(e.to_string()))?;
        paragraphs
            .into_iter()
            .next()
            .ok_or(ControlParseError::Empty)
    }

    /// Look up a known field by name, ignoring case
    pub fn get(&self, field: &str) -> Option<&str> {
        let value = if field.eq_ignore_ascii_case(FIELD_PACKAGE) {
            &self.package
        } else if field.eq_ignore_ascii_case(FIELD_VERSION) {
            &self.version
        } else if field.eq_ignore_ascii_case(FIELD_ARCHITECTURE) {
            &self.architecture
        } else if field.eq_ignore_ascii_case(FIELD_DEPENDS) {
            &self.depends
        } else if field.eq_ignore_ascii_case(FIELD_PRE_DEPENDS) {
            &self.pre_depends
        } else {
            return None;
        };
        value.as_deref()
    }

    /// Whether the paragraph carries a field
    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }
}

/// What the resolver needs to know about one fetched package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    pub dependency_groups: Vec<DependencyGroup>,
}

impl PackageMetadata {
    /// Build metadata for `name` from its control fields
    ///
    /// `Version` is required; `Depends` is optional. `artifact` is only used
    /// for error reporting.
    pub fn from_control(name: &str, fields: &ControlFields, artifact: &Path) -> Result<Self> {
        let version = fields
            .version
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::metadata(artifact, "missing required field Version"))?;

        let dependency_groups = match fields.depends.as_deref() {
            Some(depends) => {
                parse_depends(depends).map_err(|e| Error::metadata(artifact, e.to_string()))?
            }
            None => Vec::new(),
        };

        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
            dependency_groups,
        })
    }
}
