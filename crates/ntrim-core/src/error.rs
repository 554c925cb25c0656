//! Engine error types.

use crate::manifest::ManifestKind;
use std::path::PathBuf;
use thiserror::Error;

/// A single manifest file could not be turned into a record.
///
/// Recoverable: the aggregator reports it and skips the file.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {kind} file {}: {source}", .path.display())]
    Json {
        kind: ManifestKind,
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Unsupported {kind} format version {version} in {}", .path.display())]
    UnsupportedVersion {
        kind: ManifestKind,
        path: PathBuf,
        version: u32,
    },
}

impl ManifestError {
    /// The file the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Json { path, .. } | Self::UnsupportedVersion { path, .. } => {
                path
            }
        }
    }
}

/// Fatal errors that stop a trim run before any summary is produced.
#[derive(Error, Debug)]
pub enum TrimError {
    #[error("Root directory does not exist: {}", .0.display())]
    RootMissing(PathBuf),

    #[error("Root is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("Package cache not found at {}", .0.display())]
    CacheRootMissing(PathBuf),

    #[error("Package cache is not a directory: {}", .0.display())]
    CacheRootNotDirectory(PathBuf),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl TrimError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
