// src/version/mod.rs

//! Debian version ordering and version relations
//!
//! This module provides version parsing and comparison for Debian-style
//! versions (`[epoch:]upstream_version[-debian_revision]`) and the five
//! relation operators used in dependency fields.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;

/// Three-way ordering of two version strings
///
/// The resolver only ever sees versions as strings; implementations decide
/// how they are ordered. [`DebianVersionComparator`] follows dpkg.
pub trait VersionComparator {
    fn compare(&self, left: &str, right: &str) -> Ordering;
}

/// Orders versions the way `dpkg --compare-versions` does
#[derive(Debug, Clone, Copy, Default)]
pub struct DebianVersionComparator;

impl VersionComparator for DebianVersionComparator {
    fn compare(&self, left: &str, right: &str) -> Ordering {
        if left == right {
            return Ordering::Equal;
        }
        match (DebVersion::parse(left), DebVersion::parse(right)) {
            (Ok(l), Ok(r)) => l.cmp(&r),
            // Not well-formed; order the raw strings with the same rules
            _ => compare_fragment(left, right),
        }
    }
}

/// A parsed Debian version with epoch, upstream version, and revision
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DebVersion {
    pub epoch: u64,
    pub upstream: String,
    pub revision: Option<String>,
}

impl DebVersion {
    /// Parse a Debian version string
    ///
    /// Format: [epoch:]upstream_version[-debian_revision]
    /// Examples:
    /// - "4.1-3" → epoch=0, upstream="4.1", revision=Some("3")
    /// - "1:2.30-1ubuntu2" → epoch=1, upstream="2.30", revision=Some("1ubuntu2")
    /// - "2.0-rc1-4" → epoch=0, upstream="2.0-rc1", revision=Some("4")
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        let (epoch, rest) = match s.split_once(':') {
            Some((e, r)) => {
                let epoch = e.parse::<u64>().map_err(|err| {
                    Error::InvalidVersion(format!("invalid epoch in version '{}': {}", s, err))
                })?;
                (epoch, r)
            }
            None => (0, s),
        };

        // The revision is everything after the last hyphen
        let (upstream, revision) = match rest.rfind('-') {
            Some(pos) => (&rest[..pos], Some(rest[pos + 1..].to_string())),
            None => (rest, None),
        };

        if upstream.is_empty() {
            return Err(Error::InvalidVersion(format!(
                "empty upstream version in '{}'",
                s
            )));
        }

        Ok(Self {
            epoch,
            upstream: upstream.to_string(),
            revision,
        })
    }
}

impl fmt::Display for DebVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.epoch > 0 {
            write!(f, "{}:", self.epoch)?;
        }
        write!(f, "{}", self.upstream)?;
        if let Some(ref revision) = self.revision {
            write!(f, "-{}", revision)?;
        }
        Ok(())
    }
}

impl Ord for DebVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| compare_fragment(&self.upstream, &other.upstream))
            .then_with(|| {
                compare_fragment(
                    self.revision.as_deref().unwrap_or(""),
                    other.revision.as_deref().unwrap_or(""),
                )
            })
    }
}

impl PartialOrd for DebVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort weight of a non-digit character
///
/// Letters sort before everything else, `~` sorts before anything including
/// the end of the string.
fn char_weight(c: Option<u8>) -> i32 {
    match c {
        None => 0,
        Some(c) if c.is_ascii_digit() => 0,
        Some(c) if c.is_ascii_alphabetic() => c as i32,
        Some(b'~') => -1,
        Some(c) => c as i32 + 256,
    }
}

/// Compare an upstream version or a revision
///
/// Alternates between the leading non-digit run (compared by weight) and
/// the leading digit run (compared numerically) until a difference shows up.
fn compare_fragment(left: &str, right: &str) -> Ordering {
    let a = left.as_bytes();
    let b = right.as_bytes();
    let (mut i, mut j) = (0, 0);

    while i < a.len() || j < b.len() {
        while (i < a.len() && !a[i].is_ascii_digit()) || (j < b.len() && !b[j].is_ascii_digit()) {
            let wa = char_weight(a.get(i).copied());
            let wb = char_weight(b.get(j).copied());
            if wa != wb {
                return wa.cmp(&wb);
            }
            i += 1;
            j += 1;
        }

        while i < a.len() && a[i] == b'0' {
            i += 1;
        }
        while j < b.len() && b[j] == b'0' {
            j += 1;
        }

        let mut first_diff = Ordering::Equal;
        while i < a.len() && a[i].is_ascii_digit() && j < b.len() && b[j].is_ascii_digit() {
            if first_diff == Ordering::Equal {
                first_diff = a[i].cmp(&b[j]);
            }
            i += 1;
            j += 1;
        }

        // The longer digit run is the larger number
        if i < a.len() && a[i].is_ascii_digit() {
            return Ordering::Greater;
        }
        if j < b.len() && b[j].is_ascii_digit() {
            return Ordering::Less;
        }
        if first_diff != Ordering::Equal {
            return first_diff;
        }
    }

    Ordering::Equal
}

/// Version relation operators in Debian dependency fields
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `<<`
    StrictlyEarlier,
    /// `<=`
    EarlierOrEqual,
    /// `=`
    Exactly,
    /// `>=`
    LaterOrEqual,
    /// `>>`
    StrictlyLater,
    /// Any other token; kept so parsing stays lenient and rejected when checked
    Unrecognized(String),
}

impl Relation {
    /// Parse a relation token
    ///
    /// Never fails. The deprecated `<` and `>` forms mean `<=` and `>=`.
    pub fn parse(token: &str) -> Self {
        match token.trim() {
            "<<" => Relation::StrictlyEarlier,
            "<=" | "<" => Relation::EarlierOrEqual,
            "=" => Relation::Exactly,
            ">=" | ">" => Relation::LaterOrEqual,
            ">>" => Relation::StrictlyLater,
            other => Relation::Unrecognized(other.to_string()),
        }
    }

    /// Whether `actual.cmp(required)` yielding `ordering` satisfies the relation
    ///
    /// Returns an error for unrecognized tokens.
    pub fn accepts(&self, ordering: Ordering) -> Result<bool> {
        use Ordering::{Equal, Greater, Less};

        Ok(match self {
            Relation::StrictlyEarlier => ordering == Less,
            Relation::EarlierOrEqual => matches!(ordering, Less | Equal),
            Relation::Exactly => ordering == Equal,
            Relation::LaterOrEqual => matches!(ordering, Equal | Greater),
            Relation::StrictlyLater => ordering == Greater,
            Relation::Unrecognized(token) => return Err(Error::InvalidRelation(token.clone())),
        })
    }

    /// The operator as written in a dependency field
    pub fn as_str(&self) -> &str {
        match self {
            Relation::StrictlyEarlier => "<<",
            Relation::EarlierOrEqual => "<=",
            Relation::Exactly => "=",
            Relation::LaterOrEqual => ">=",
            Relation::StrictlyLater => ">>",
            Relation::Unrecognized(token) => token,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
