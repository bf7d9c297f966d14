//! Typed error definitions for sector_sort.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SectorError {
    #[error("Sectors root does not exist: {0}")]
    RootMissing(PathBuf),

    #[error("Sectors root is not a directory: {0}")]
    RootNotDirectory(PathBuf),

    #[error("Cannot decode {path} as {encoding}")]
    Undecodable { path: PathBuf, encoding: &'static str },

    #[error("Text for {path} contains characters not representable in {encoding}")]
    Unencodable { path: PathBuf, encoding: &'static str },

    #[error("File name has no usable stem: {0}")]
    InvalidName(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),
}

impl SectorError {
    /// Stable numeric code, emitted as a structured log field.
    pub fn code(&self) -> u16 {
        match self {
            SectorError::RootMissing(_) => 10,
            SectorError::RootNotDirectory(_) => 11,
            SectorError::Undecodable { .. } => 20,
            SectorError::Unencodable { .. } => 21,
            SectorError::InvalidName(_) => 30,
            SectorError::ConfigNotFound(_) => 40,
        }
    }
}
