// src/resolver/checker.rs

//! Version relation checks for resolved packages

use crate::dependencies::PackageConstraint;
use crate::error::{Error, Result};
use crate::version::{DebianVersionComparator, VersionComparator};

/// Checks concrete versions against dependency constraints
#[derive(Debug, Clone, Default)]
pub struct ConstraintChecker<C = DebianVersionComparator> {
    comparator: C,
}

impl<C: VersionComparator> ConstraintChecker<C> {
    pub fn new(comparator: C) -> Self {
        Self { comparator }
    }

    /// Check that `actual` satisfies `constraint`
    ///
    /// A constraint without a relation accepts anything. A failed relation
    /// is [`Error::VersionConstraint`]; a relation that is unknown or has no
    /// version to compare against is [`Error::InvalidRelation`].
    pub fn check(&self, constraint: &PackageConstraint, actual: &str) -> Result<()> {
        let Some(relation) = &constraint.relation else {
            return Ok(());
        };
        let required = constraint
            .version
            .as_deref()
            .ok_or_else(|| Error::InvalidRelation(format!("{} without a version", constraint)))?;

        let ordering = self.comparator.compare(actual, required);
        if relation.accepts(ordering)? {
            Ok(())
        } else {
            Err(Error::VersionConstraint {
                constraint: constraint.to_string(),
                actual: actual.to_string(),
            })
        }
    }

    /// Like [`check`](Self::check) but only reports a failed relation
    ///
    /// Malformed constraints are still errors.
    pub fn is_satisfied(&self, constraint: &PackageConstraint, actual: &str) -> Result<bool> {
        match self.check(constraint, actual) {
            Ok(()) => Ok(true),
            Err(Error::VersionConstraint { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
