// src/resolver/mod.rs

//! Dependency closure resolution
//!
//! [`Resolver`] turns a plan of package names into a [`PackageSpec`] that
//! pins every package the plan transitively depends on.
//!
//! [`PackageSpec`]: crate::spec::PackageSpec

mod checker;
mod engine;
mod plan;
pub mod workdir;

pub use checker::ConstraintChecker;
pub use engine::{Requirement, Resolver, ResolverOptions};
pub use plan::{InstallBatches, Installer};
pub use workdir::{create_workdir, DEFAULT_WORKDIR_ROOT};
