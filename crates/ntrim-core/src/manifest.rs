//! Manifest readers.
//!
//! Each [`ManifestKind`] is discovered by file name and decoded into a
//! [`ManifestRecord`]. A record knows which of its entries count as "used"
//! and hands them out already normalized, so the aggregator never sees raw
//! name/version strings.

use crate::error::ManifestError;
use ntrim_schema::{
    AssetsFile, DependencyType, DotnetToolsFile, PackageIdentity, PackagesLockFile,
};
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// The manifest files a project tree can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    /// `project.assets.json`, written by restore into `obj/`.
    Assets,
    /// `project.lock.json`, the pre-SDK equivalent of the assets file.
    LegacyLock,
    /// `packages.lock.json`, the repeatable-restore lock file.
    PackagesLock,
    /// `dotnet-tools.json`, the local tool manifest.
    ToolManifest,
}

impl ManifestKind {
    /// Every kind, in scan order.
    pub const ALL: [ManifestKind; 4] = [
        ManifestKind::Assets,
        ManifestKind::LegacyLock,
        ManifestKind::PackagesLock,
        ManifestKind::ToolManifest,
    ];

    /// The file name this kind is discovered by.
    pub fn file_name(self) -> &'static str {
        match self {
            ManifestKind::Assets => "project.assets.json",
            ManifestKind::LegacyLock => "project.lock.json",
            ManifestKind::PackagesLock => "packages.lock.json",
            ManifestKind::ToolManifest => DotnetToolsFile::FILE_NAME,
        }
    }

    /// Whether `path` names a file of this kind (case-insensitive).
    pub fn matches(self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|n| n.eq_ignore_ascii_case(self.file_name()))
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// A decoded manifest.
#[derive(Debug, Clone)]
pub enum ManifestRecord {
    /// An assets file or a legacy `project.lock.json`.
    Assets(AssetsFile),
    /// A `packages.lock.json`.
    PackagesLock(PackagesLockFile),
    /// A `dotnet-tools.json`.
    ToolManifest(DotnetToolsFile),
}

impl ManifestRecord {
    /// Package identities this manifest marks as used.
    ///
    /// In-solution project references are excluded: they never occupy a
    /// folder in the packages cache. Entries without a usable name or
    /// version are skipped.
    pub fn used_packages(&self) -> Vec<PackageIdentity> {
        match self {
            ManifestRecord::Assets(file) => assets_used(file),
            ManifestRecord::PackagesLock(file) => packages_lock_used(file),
            ManifestRecord::ToolManifest(file) => tools_used(file),
        }
    }
}

fn identity(name: &str, version: &str) -> Option<PackageIdentity> {
    if name.trim().is_empty() || version.trim().is_empty() {
        return None;
    }
    Some(PackageIdentity::normalize(name, version))
}

fn assets_used(file: &AssetsFile) -> Vec<PackageIdentity> {
    file.libraries
        .iter()
        .filter(|(_, lib)| !lib.is_project())
        .filter_map(|(key, _)| {
            let parsed = AssetsFile::split_key(key).and_then(|(n, v)| identity(n, v));
            if parsed.is_none() {
                warn!(key = %key, "skipping malformed library key");
            }
            parsed
        })
        .collect()
}

fn packages_lock_used(file: &PackagesLockFile) -> Vec<PackageIdentity> {
    file.dependencies
        .values()
        .flat_map(|target| target.iter())
        .filter(|(_, dep)| dep.kind != DependencyType::Project)
        .filter_map(|(id, dep)| {
            let parsed = dep.resolved.as_deref().and_then(|v| identity(id, v));
            if parsed.is_none() {
                warn!(package = %id, "skipping lock entry without a resolved version");
            }
            parsed
        })
        .collect()
}

fn tools_used(file: &DotnetToolsFile) -> Vec<PackageIdentity> {
    file.tools
        .iter()
        .filter_map(|(id, tool)| {
            let parsed = identity(id, &tool.version);
            if parsed.is_none() {
                warn!(tool = %id, "skipping tool entry without an id or version");
            }
            parsed
        })
        .collect()
}

/// Turns one manifest file into a record.
///
/// The engine calls this once per discovered file and treats every error as
/// "skip this file".
pub trait ManifestParser {
    /// Decode `path` as a manifest of the given kind.
    ///
    /// # Errors
    ///
    /// Returns a [`ManifestError`] when the file cannot be read or decoded.
    fn parse(&self, kind: ManifestKind, path: &Path) -> Result<ManifestRecord, ManifestError>;
}

/// Reads manifests from disk with `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonManifestParser;

impl ManifestParser for JsonManifestParser {
    fn parse(&self, kind: ManifestKind, path: &Path) -> Result<ManifestRecord, ManifestError> {
        debug!(path = %path.display(), %kind, "reading manifest");
        let bytes = std::fs::read(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

        match kind {
            ManifestKind::Assets | ManifestKind::LegacyLock => {
                let file: AssetsFile = decode(kind, path, body)?;
                check_version(kind, path, file.version, AssetsFile::MAX_VERSION)?;
                Ok(ManifestRecord::Assets(file))
            }
            ManifestKind::PackagesLock => {
                let file: PackagesLockFile = decode(kind, path, body)?;
                check_version(kind, path, file.version, PackagesLockFile::MAX_VERSION)?;
                Ok(ManifestRecord::PackagesLock(file))
            }
            ManifestKind::ToolManifest => {
                let file: DotnetToolsFile = decode(kind, path, body)?;
                check_version(kind, path, file.version, DotnetToolsFile::MAX_VERSION)?;
                Ok(ManifestRecord::ToolManifest(file))
            }
        }
    }
}

fn decode<T: DeserializeOwned>(
    kind: ManifestKind,
    path: &Path,
    body: &[u8],
) -> Result<T, ManifestError> {
    serde_json::from_slice(body).map_err(|source| ManifestError::Json {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

/// Version 0 is invalid; versions newer than `max` are read with a warning.
fn check_version(
    kind: ManifestKind,
    path: &Path,
    version: u32,
    max: u32,
) -> Result<(), ManifestError> {
    if version == 0 {
        return Err(ManifestError::UnsupportedVersion {
            kind,
            path: path.to_path_buf(),
            version,
        });
    }
    if version > max {
        warn!(
            path = %path.display(),
            %kind,
            version,
            max,
            "newer manifest format, reading known fields"
        );
    }
    Ok(())
}
