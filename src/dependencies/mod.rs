// src/dependencies/mod.rs

//! Debian dependency descriptors
//!
//! A `Depends` field is a comma-separated list of entries. Each entry is
//! either a single constraint or a `|`-separated group of alternatives:
//!
//! ```text
//! libc6 (>= 2.7), debconf | debconf-2.0, awk
//! ```
//!
//! # Example
//!
//! ```
//! use debclosure::dependencies::{parse_depends, Relation};
//!
//! let groups = parse_depends("libc6 (>= 2.7), debconf | debconf-2.0").unwrap();
//! assert_eq!(groups.len(), 2);
//! assert_eq!(groups[0].preferred().relation, Some(Relation::LaterOrEqual));
//! assert_eq!(groups[1].alternatives().len(), 2);
//! ```

mod parser;
mod virtuals;

pub use crate::version::Relation;
pub use parser::{parse_depends, parse_entry, ParseError};
pub use virtuals::{is_preinstall, resolve_virtual, PREINSTALL_PREFIX, VIRTUAL_ALIASES};

use std::fmt;

/// A single `name [(relation version)]` requirement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageConstraint {
    pub name: String,
    /// `None` means any version is acceptable
    pub relation: Option<Relation>,
    pub version: Option<String>,
}

impl PackageConstraint {
    /// A constraint accepting any version of `name`
    pub fn any(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relation: None,
            version: None,
        }
    }

    /// A constraint with a version relation
    pub fn versioned(name: impl Into<String>, relation: Relation, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relation: Some(relation),
            version: Some(version.into()),
        }
    }

    /// Same constraint with the name passed through the virtual alias table
    pub fn resolved(&self) -> Self {
        Self {
            name: resolve_virtual(&self.name).to_string(),
            relation: self.relation.clone(),
            version: self.version.clone(),
        }
    }
}

impl fmt::Display for PackageConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        match (&self.relation, &self.version) {
            (Some(relation), Some(version)) => write!(f, " ({} {})", relation, version),
            (Some(relation), None) => write!(f, " ({})", relation),
            _ => Ok(()),
        }
    }
}

/// An ordered OR-alternation of constraints; never empty
///
/// The first-listed alternative is preferred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGroup {
    alternatives: Vec<PackageConstraint>,
}

impl DependencyGroup {
    /// Build a group from alternatives, `None` if there are none
    pub fn new(alternatives: Vec<PackageConstraint>) -> Option<Self> {
        if alternatives.is_empty() {
            None
        } else {
            Some(Self { alternatives })
        }
    }

    /// A group holding one constraint
    pub fn single(constraint: PackageConstraint) -> Self {
        Self {
            alternatives: vec![constraint],
        }
    }

    pub fn alternatives(&self) -> &[PackageConstraint] {
        &self.alternatives
    }

    /// The first-listed alternative
    pub fn preferred(&self) -> &PackageConstraint {
        &self.alternatives[0]
    }

    /// The last-listed alternative, used when nothing in the group exists
    pub fn fallback(&self) -> &PackageConstraint {
        &self.alternatives[self.alternatives.len() - 1]
    }

    pub fn is_alternation(&self) -> bool {
        self.alternatives.len() > 1
    }
}

impl fmt::Display for DependencyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, alt) in self.alternatives.iter().enumerate() {
            if i != 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{}", alt)?;
        }
        Ok(())
    }
}
