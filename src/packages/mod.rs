// src/packages/mod.rs

//! Package artifacts and their metadata
//!
//! This module reads the control paragraph of fetched `.deb` artifacts and
//! parses pool artifact filenames. Metadata readers implement the
//! `MetadataSource` trait so the resolver can be driven by fakes in tests.

pub mod control;
pub mod deb;
pub mod filename;
pub mod traits;

pub use control::{ControlFields, ControlParseError, PackageMetadata};
pub use deb::DebArchiveSource;
pub use filename::ArtifactName;
pub use traits::MetadataSource;
