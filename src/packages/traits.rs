// src/packages/traits.rs

//! Common traits for package metadata readers

use super::control::{ControlFields, PackageMetadata};
use crate::error::Result;
use std::path::Path;

/// Reads the control paragraph out of a fetched package artifact
///
/// Implementations only need to provide [`read_control`](Self::read_control);
/// turning the fields into [`PackageMetadata`] is shared.
pub trait MetadataSource {
    /// Read the raw control fields of the artifact at `path`
    fn read_control(&self, path: &Path) -> Result<ControlFields>;

    /// Read the metadata the resolver needs for package `name`
    fn read_metadata(&self, name: &str, path: &Path) -> Result<PackageMetadata> {
        let fields = self.read_control(path)?;
        PackageMetadata::from_control(name, &fields, path)
    }
}

impl<T: MetadataSource + ?Sized> MetadataSource for &T {
    fn read_control(&self, path: &Path) -> Result<ControlFields> {
        (**self).read_control(path)
    }

    fn read_metadata(&self, name: &str, path: &Path) -> Result<PackageMetadata> {
        (**self).read_metadata(name, path)
    }
}
