// src/resolver/engine.rs

//! Plan resolver implementation
//!
//! Resolution runs in rounds. Each round fetches every outstanding package
//! into a fresh work dir, reads their control metadata, pins their versions
//! and collects the dependencies they name. The next round handles whatever
//! was discovered and isn't pinned yet, so cyclic dependency graphs end as
//! soon as every package on the cycle is pinned.

use crate::dependencies::{resolve_virtual, DependencyGroup, PackageConstraint};
use crate::error::{Error, Result};
use crate::packages::{ArtifactName, MetadataSource};
use crate::pool::PoolClient;
use crate::spec::PackageSpec;
use crate::version::{DebianVersionComparator, VersionComparator};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::checker::ConstraintChecker;
use super::workdir::{create_workdir, DEFAULT_WORKDIR_ROOT};

/// Knobs for a [`Resolver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Directory under which per-round work dirs are created
    pub workdir_root: PathBuf,
    /// Run [`Resolver::verify`] before returning a spec
    pub enforce_constraints: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            workdir_root: PathBuf::from(DEFAULT_WORKDIR_ROOT),
            enforce_constraints: false,
        }
    }
}

/// A dependency selected while resolving, and who asked for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub required_by: String,
    /// Name already passed through the virtual alias table
    pub constraint: PackageConstraint,
}

/// Resolves a plan of package names into a pinned [`PackageSpec`]
pub struct Resolver<P, M, C = DebianVersionComparator> {
    pool: P,
    source: M,
    checker: ConstraintChecker<C>,
    options: ResolverOptions,
    requirements: Vec<Requirement>,
    /// Full metadata versions, epoch included
    versions: BTreeMap<String, String>,
    workdirs: Vec<PathBuf>,
}

impl<P: PoolClient, M: MetadataSource> Resolver<P, M> {
    pub fn new(pool: P, source: M, options: ResolverOptions) -> Self {
        Self::with_comparator(pool, source, options, DebianVersionComparator)
    }
}

impl<P: PoolClient, M: MetadataSource, C: VersionComparator> Resolver<P, M, C> {
    /// Create a resolver with a custom version comparator
    pub fn with_comparator(pool: P, source: M, options: ResolverOptions, comparator: C) -> Self {
        Self {
            pool,
            source,
            checker: ConstraintChecker::new(comparator),
            options,
            requirements: Vec::new(),
            versions: BTreeMap::new(),
            workdirs: Vec::new(),
        }
    }

    /// Resolve `plan` and everything it depends on
    ///
    /// Any failure aborts the call; no partial spec is returned.
    pub fn resolve_plan<I, S>(&mut self, plan: I) -> Result<PackageSpec>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.requirements.clear();
        self.versions.clear();
        self.workdirs.clear();

        let mut spec = PackageSpec::new();
        let mut to_resolve: BTreeSet<String> = plan
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .map(|name| resolve_virtual(&name).to_string())
            .collect();

        let mut round = 0usize;
        while !to_resolve.is_empty() {
            round += 1;
            let workdir = create_workdir(&self.options.workdir_root)?;
            info!(
                "Round {}: resolving {} packages in {}",
                round,
                to_resolve.len(),
                workdir.display()
            );

            let names: Vec<String> = to_resolve.into_iter().collect();
            self.pool.fetch(&names, &workdir)?;
            let artifacts = index_artifacts(&workdir)?;
            self.workdirs.push(workdir.clone());

            let mut discovered = BTreeSet::new();
            for name in &names {
                let path = artifacts.get(name).ok_or_else(|| {
                    Error::metadata(workdir.join(name), "no artifact fetched for package")
                })?;
                let metadata = self.source.read_metadata(name, path)?;

                if spec.pin(name, &metadata.version) {
                    debug!("Pinned {}={}", name, metadata.version);
                    self.versions
                        .insert(name.clone(), metadata.version.clone());
                }

                for group in &metadata.dependency_groups {
                    let constraint = self.select_alternative(group)?;
                    discovered.insert(constraint.name.clone());
                    self.requirements.push(Requirement {
                        required_by: name.clone(),
                        constraint,
                    });
                }
            }

            to_resolve = discovered
                .into_iter()
                .filter(|name| !spec.exists(name))
                .collect();
        }

        info!("Resolved {} packages in {} rounds", spec.len(), round);

        if self.options.enforce_constraints {
            self.verify()?;
        }

        Ok(spec)
    }

    /// Pick the alternative of `group` to depend on
    ///
    /// The first alternative present in the pool wins; if none is, the
    /// last-listed one is used. Single constraints are taken as-is.
    fn select_alternative(&self, group: &DependencyGroup) -> Result<PackageConstraint> {
        if !group.is_alternation() {
            return Ok(group.preferred().resolved());
        }

        for alternative in group.alternatives() {
            let resolved = alternative.resolved();
            if self.pool.exists(&resolved.name)? {
                debug!("Selected {} from `{}'", resolved.name, group);
                return Ok(resolved);
            }
        }

        let fallback = group.fallback().resolved();
        debug!(
            "No alternative of `{}' in pool, falling back to {}",
            group, fallback.name
        );
        Ok(fallback)
    }

    /// Check every recorded requirement against the resolved versions
    ///
    /// Requirements on packages that were never resolved are skipped. The
    /// first violation is returned.
    pub fn verify(&self) -> Result<()> {
        for requirement in &self.requirements {
            let Some(actual) = self.versions.get(&requirement.constraint.name) else {
                continue;
            };
            self.checker
                .check(&requirement.constraint, actual)
                .inspect_err(|_| {
                    debug!("{} requires {}", requirement.required_by, requirement.constraint)
                })?;
        }
        Ok(())
    }

    /// Dependencies selected during the last resolution
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Full metadata version of a resolved package, epoch included
    pub fn resolved_version(&self, name: &str) -> Option<&str> {
        self.versions.get(name).map(String::as_str)
    }

    /// Work dirs created during the last resolution, in round order
    pub fn workdirs(&self) -> &[PathBuf] {
        &self.workdirs
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn pool(&self) -> &P {
        &self.pool
    }
}

/// Map package names to the `.deb` artifacts found in `dir`
fn index_artifacts(dir: &Path) -> Result<HashMap<String, PathBuf>> {
    let mut artifacts = HashMap::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let filename = entry.file_name();
        let Some(filename) = filename.to_str() else {
            continue;
        };
        if !path.is_file() || !ArtifactName::is_artifact(filename) {
            continue;
        }

        let artifact = ArtifactName::parse(filename)?;
        artifacts.insert(artifact.name, path);
    }

    Ok(artifacts)
}
