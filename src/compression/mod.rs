// src/compression/mod.rs
//! Decompression for `.deb` archive members
//!
//! The control member of a Debian package is a tarball that may be stored
//! uncompressed or compressed with gzip, xz or zstd. The compression is
//! named by the member's suffix (`control.tar.xz`).

use std::io::{self, Read};
use thiserror::Error;

/// Compression-related errors
#[derive(Error, Debug)]
pub enum CompressionError {
    #[error("Failed to create {format} decoder: {source}")]
    DecoderCreation {
        format: &'static str,
        source: io::Error,
    },

    #[error("Unsupported compression for member {0}")]
    UnsupportedFormat(String),
}

/// Supported member compressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain tarball
    None,
    /// `.gz`
    Gzip,
    /// `.xz`
    Xz,
    /// `.zst`
    Zstd,
}

impl CompressionFormat {
    /// Detect compression from an ar member name such as `control.tar.gz`
    ///
    /// # Examples
    /// ```
    /// use debclosure::compression::CompressionFormat;
    ///
    /// assert_eq!(CompressionFormat::from_member_name("control.tar.gz").unwrap(), CompressionFormat::Gzip);
    /// assert_eq!(CompressionFormat::from_member_name("control.tar").unwrap(), CompressionFormat::None);
    /// assert!(CompressionFormat::from_member_name("control.tar.bz2").is_err());
    /// ```
    pub fn from_member_name(name: &str) -> Result<Self, CompressionError> {
        let suffix = name
            .find(".tar")
            .map(|pos| &name[pos + ".tar".len()..])
            .ok_or_else(|| CompressionError::UnsupportedFormat(name.to_string()))?;

        match suffix {
            "" => Ok(Self::None),
            ".gz" => Ok(Self::Gzip),
            ".xz" => Ok(Self::Xz),
            ".zst" => Ok(Self::Zstd),
            _ => Err(CompressionError::UnsupportedFormat(name.to_string())),
        }
    }

    /// Get a human-readable name for this format
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Xz => "xz",
            Self::Zstd => "zstd",
        }
    }
}

impl std::fmt::Display for CompressionFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Create a decompressing reader for the given format
///
/// For `CompressionFormat::None`, returns the reader unchanged.
pub fn create_decoder<'a, R: Read + 'a>(
    reader: R,
    format: CompressionFormat,
) -> Result<Box<dyn Read + 'a>, CompressionError> {
    match format {
        CompressionFormat::None => Ok(Box::new(reader)),
        CompressionFormat::Gzip => Ok(Box::new(flate2::read::GzDecoder::new(reader))),
        CompressionFormat::Xz => Ok(Box::new(xz2::read::XzDecoder::new(reader))),
        CompressionFormat::Zstd => {
            let decoder = zstd::Decoder::new(reader).map_err(|e| CompressionError::DecoderCreation {
                format: "zstd",
                source: e,
            })?;
            Ok(Box::new(decoder))
        }
    }
}
