//! Global packages folder scanner.
//!
//! Layout:
//!
//! ```text
//! ~/.nuget/packages/
//! ├── newtonsoft.json/
//! │   ├── 12.0.3/
//! │   └── 13.0.3/
//! └── serilog/
//!     └── 3.1.1/
//! ```

use crate::error::TrimError;
use crate::reporter::Reporter;
use ntrim_schema::{PackageIdentity, PackageName, Version};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Deepest directory level followed when sizing a version folder.
const MAX_SIZE_DEPTH: usize = 64;

/// One installed `name/version` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Package id, taken from the parent directory name.
    pub name: PackageName,
    /// Version, taken from the directory name.
    pub version: Version,
    /// The version directory itself.
    pub path: PathBuf,
    /// Total size of the regular files below `path`.
    pub size_bytes: u64,
}

impl CacheEntry {
    /// The identity used to look this entry up in the used-set.
    pub fn identity(&self) -> PackageIdentity {
        PackageIdentity::normalize(&self.name, &self.version)
    }
}

/// One package-name directory and the versions found under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPackage {
    /// Package id, taken from the directory name.
    pub name: PackageName,
    /// The package directory.
    pub path: PathBuf,
    /// Version directories found under `path`, sorted by version.
    pub versions: Vec<CacheEntry>,
    /// False when listing `path` failed partway, so `versions` may be missing
    /// entries. Such a package must never be removed as a whole.
    pub complete: bool,
}

/// Something under the cache root that could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanAnomaly {
    /// The entry that could not be read.
    pub path: PathBuf,
    /// The underlying error.
    pub message: String,
}

/// Result of [`scan_cache`].
#[derive(Debug, Clone, Default)]
pub struct CacheScan {
    /// The packages folder that was scanned.
    pub root: PathBuf,
    /// Package directories sorted by name, versions sorted by version.
    pub packages: Vec<CachedPackage>,
    /// Everything that could not be read, in discovery order.
    pub anomalies: Vec<ScanAnomaly>,
}

impl CacheScan {
    /// Every version entry across all packages.
    pub fn entries(&self) -> impl Iterator<Item = &CacheEntry> {
        self.packages.iter().flat_map(|p| p.versions.iter())
    }
}

/// Check that the packages folder exists and is a directory.
///
/// # Errors
///
/// Returns [`TrimError::CacheRootMissing`] or
/// [`TrimError::CacheRootNotDirectory`], or an I/O error when the metadata
/// cannot be read.
pub fn validate_cache_root(cache_root: &Path) -> Result<(), TrimError> {
    match fs::metadata(cache_root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(TrimError::CacheRootNotDirectory(cache_root.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(TrimError::CacheRootMissing(cache_root.to_path_buf()))
        }
        Err(e) => Err(TrimError::io(cache_root, e)),
    }
}

/// Enumerate the packages folder at `cache_root`.
///
/// Dot-prefixed first-level directories (NuGet housekeeping such as `.tools`)
/// and plain files are ignored. Package directories that cannot be listed are
/// reported and left out of the scan entirely, so they can never end up in a
/// trim plan.
///
/// # Errors
///
/// Fails only when the cache root is missing, is not a directory, or cannot
/// be listed.
pub fn scan_cache<R: Reporter>(cache_root: &Path, reporter: &R) -> Result<CacheScan, TrimError> {
    validate_cache_root(cache_root)?;

    let mut scan = CacheScan {
        root: cache_root.to_path_buf(),
        ..CacheScan::default()
    };

    let listing = fs::read_dir(cache_root).map_err(|e| TrimError::io(cache_root, e))?;
    for entry in listing {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                note(&mut scan.anomalies, reporter, cache_root, &e.to_string());
                continue;
            }
        };

        let path = entry.path();
        let Some(dir_name) = entry.file_name().to_str().map(str::to_string) else {
            note(&mut scan.anomalies, reporter, &path, "non UTF-8 directory name");
            continue;
        };
        if dir_name.starts_with('.') || !is_dir(&entry) {
            debug!(path = %path.display(), "ignoring non-package entry");
            continue;
        }

        if let Some(package) = scan_package(&path, &dir_name, &mut scan.anomalies, reporter) {
            scan.packages.push(package);
        }
    }

    scan.packages.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(scan)
}

fn scan_package<R: Reporter>(
    path: &Path,
    dir_name: &str,
    anomalies: &mut Vec<ScanAnomaly>,
    reporter: &R,
) -> Option<CachedPackage> {
    let listing = match fs::read_dir(path) {
        Ok(listing) => listing,
        Err(e) => {
            note(anomalies, reporter, path, &e.to_string());
            return None;
        }
    };

    let name = PackageName::new(dir_name);
    let mut versions = Vec::new();
    let mut complete = true;
    for entry in listing {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                note(anomalies, reporter, path, &e.to_string());
                complete = false;
                continue;
            }
        };
        match entry.file_type() {
            Ok(t) if t.is_dir() => {}
            Ok(_) => continue,
            Err(e) => {
                note(anomalies, reporter, &entry.path(), &e.to_string());
                complete = false;
                continue;
            }
        }

        let version_path = entry.path();
        let version = Version::new(&entry.file_name().to_string_lossy());
        let size_bytes = dir_size(&version_path, anomalies, reporter);
        versions.push(CacheEntry {
            name: name.clone(),
            version,
            path: version_path,
            size_bytes,
        });
    }

    versions.sort_by(|a, b| a.version.cmp(&b.version));
    Some(CachedPackage {
        name,
        path: path.to_path_buf(),
        versions,
        complete,
    })
}

fn is_dir(entry: &fs::DirEntry) -> bool {
    entry.file_type().is_ok_and(|t| t.is_dir())
}

/// Recursive size of all regular files under `dir`.
///
/// Symlinks are not followed. Unreadable entries, and anything nested deeper
/// than the walk limit, contribute zero and are recorded as anomalies.
pub fn dir_size<R: Reporter>(dir: &Path, anomalies: &mut Vec<ScanAnomaly>, reporter: &R) -> u64 {
    let mut total = 0;
    for entry in WalkDir::new(dir)
        .follow_links(false)
        .max_depth(MAX_SIZE_DEPTH)
    {
        match entry {
            Ok(entry) if entry.file_type().is_file() => match entry.metadata() {
                Ok(meta) => total += meta.len(),
                Err(e) => note(anomalies, reporter, entry.path(), &e.to_string()),
            },
            Ok(entry) if entry.depth() == MAX_SIZE_DEPTH && entry.file_type().is_dir() => {
                note(
                    anomalies,
                    reporter,
                    entry.path(),
                    &format!("nested deeper than {MAX_SIZE_DEPTH} levels, contents not counted"),
                );
            }
            Ok(_) => {}
            Err(e) => {
                let path = e.path().unwrap_or(dir).to_path_buf();
                note(anomalies, reporter, &path, &e.to_string());
            }
        }
    }
    total
}

fn note<R: Reporter>(anomalies: &mut Vec<ScanAnomaly>, reporter: &R, path: &Path, message: &str) {
    warn!(path = %path.display(), %message, "cache entry unreadable");
    reporter.warning(&format!("Cannot read {}: {message}", path.display()));
    anomalies.push(ScanAnomaly {
        path: path.to_path_buf(),
        message: message.to_string(),
    });
}
