//! Usage aggregation: which package versions do the scanned projects use?

use crate::error::{ManifestError, TrimError};
use crate::manifest::{ManifestKind, ManifestParser};
use crate::reporter::Reporter;
use ntrim_schema::{PackageIdentity, PackageName};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A manifest that was discovered but could not be used.
#[derive(Debug)]
pub struct ManifestFailure {
    /// Which kind of manifest the file was discovered as.
    pub kind: ManifestKind,
    /// Why it was skipped.
    pub error: ManifestError,
}

/// Result of [`collect_used`].
#[derive(Debug, Default)]
pub struct UsageReport {
    /// Union of every identity referenced by any scanned manifest.
    pub used: HashSet<PackageIdentity>,
    /// Number of manifests that were read successfully.
    pub manifests_read: usize,
    /// Manifests that were skipped, each listed once.
    pub failures: Vec<ManifestFailure>,
}

impl UsageReport {
    /// Number of distinct package names in the used-set.
    pub fn distinct_names(&self) -> usize {
        self.used
            .iter()
            .map(|id| &id.name)
            .collect::<HashSet<&PackageName>>()
            .len()
    }
}

/// Check that every root exists and is a directory.
///
/// # Errors
///
/// Returns [`TrimError::RootMissing`] or [`TrimError::RootNotDirectory`] for
/// the first offending root.
pub fn validate_roots(roots: &[PathBuf]) -> Result<(), TrimError> {
    for root in roots {
        match std::fs::metadata(root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(TrimError::RootNotDirectory(root.clone())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TrimError::RootMissing(root.clone()));
            }
            Err(e) => return Err(TrimError::io(root, e)),
        }
    }
    Ok(())
}

/// Recursively find every file of `kind` under `root`.
///
/// Symlinked directories are followed; loops and directories that cannot be
/// read are reported and skipped.
pub fn discover<R: Reporter>(root: &Path, kind: ManifestKind, reporter: &R) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && kind.matches(entry.path()) {
                    found.push(entry.into_path());
                }
            }
            Err(err) => {
                let location = err
                    .path()
                    .map_or_else(|| root.display().to_string(), |p| p.display().to_string());
                warn!(path = %location, error = %err, "skipping unreadable directory entry");
                reporter.warning(&format!("Cannot read {location}: {err}. Skipping."));
            }
        }
    }
    found.sort();
    found
}

/// Collect the used-set from every manifest under `roots`.
///
/// Never fails: unreadable or malformed manifests are reported, recorded in
/// [`UsageReport::failures`] and skipped. A file reachable from more than one
/// root is read once.
pub fn collect_used<P, R>(roots: &[PathBuf], parser: &P, reporter: &R) -> UsageReport
where
    P: ManifestParser + ?Sized,
    R: Reporter,
{
    let mut report = UsageReport::default();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for kind in ManifestKind::ALL {
        reporter.section(&format!("Collecting {kind} files"));

        for root in roots {
            for path in discover(root, kind, reporter) {
                let key = path.canonicalize().unwrap_or_else(|_| path.clone());
                if !seen.insert(key) {
                    debug!(path = %path.display(), "already read via another root");
                    continue;
                }

                match parser.parse(kind, &path) {
                    Ok(record) => {
                        report.manifests_read += 1;
                        report.used.extend(record.used_packages());
                    }
                    Err(error) => {
                        warn!(path = %path.display(), %error, "failed parsing manifest");
                        reporter.warning(&format!("Failed parsing {}. Skipping.", path.display()));
                        report.failures.push(ManifestFailure { kind, error });
                    }
                }
            }
        }
    }

    report
}
