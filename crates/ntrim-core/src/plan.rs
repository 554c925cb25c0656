//! Trim planning.
//!
//! A package directory whose versions are all unused is removed as a whole;
//! otherwise only its unused version directories are. A package directory
//! that could only be partly listed is never removed as a whole. The plan
//! never names a directory that contains a used version.

use crate::cache::{CacheEntry, CacheScan};
use ntrim_schema::{PackageIdentity, PackageName, Version};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// A cache entry with its used/trimmable verdict.
#[derive(Debug, Clone)]
pub struct ClassifiedEntry {
    /// The cached version.
    pub entry: CacheEntry,
    /// Whether its identity is in the used-set.
    pub is_used: bool,
}

/// A directory the executor should delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrimTarget {
    /// The whole package directory; no version under it is used.
    Package {
        /// Package id.
        name: PackageName,
        /// The package directory.
        path: PathBuf,
        /// Combined size of its versions.
        size_bytes: u64,
        /// Number of version directories removed with it.
        versions: usize,
    },
    /// A single version directory of a package that is otherwise in use.
    Version {
        /// Package id.
        name: PackageName,
        /// The unused version.
        version: Version,
        /// The version directory.
        path: PathBuf,
        /// Size of the version directory.
        size_bytes: u64,
    },
}

impl TrimTarget {
    /// Package id of the target.
    pub fn name(&self) -> &PackageName {
        match self {
            TrimTarget::Package { name, .. } | TrimTarget::Version { name, .. } => name,
        }
    }

    /// The version, for version-level targets.
    pub fn version(&self) -> Option<&Version> {
        match self {
            TrimTarget::Package { .. } => None,
            TrimTarget::Version { version, .. } => Some(version),
        }
    }

    /// Directory to delete.
    pub fn path(&self) -> &Path {
        match self {
            TrimTarget::Package { path, .. } | TrimTarget::Version { path, .. } => path,
        }
    }

    /// Bytes freed by deleting [`TrimTarget::path`].
    pub fn size_bytes(&self) -> u64 {
        match self {
            TrimTarget::Package { size_bytes, .. } | TrimTarget::Version { size_bytes, .. } => {
                *size_bytes
            }
        }
    }
}

impl fmt::Display for TrimTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrimTarget::Package { name, .. } => write!(f, "{name}"),
            TrimTarget::Version { name, version, .. } => write!(f, "{name}/{version}"),
        }
    }
}

/// Aggregate counts and sizes of a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrimStats {
    /// Package/version pairs in the used-set.
    pub used_pairs: usize,
    /// Distinct names in the used-set.
    pub used_names: usize,
    /// Package/version directories in the cache.
    pub cached_pairs: usize,
    /// Package directories holding at least one version.
    pub cached_names: usize,
    /// Package/version directories not in the used-set.
    pub trimmable_pairs: usize,
    /// Package directories holding at least one trimmable version.
    pub trimmable_names: usize,
    /// Package directories with no version directories at all.
    pub empty_packages: usize,
    /// Size of every cached version.
    pub total_bytes: u64,
    /// Size of every unused version.
    pub trimmable_bytes: u64,
}

impl TrimStats {
    /// Trimmable share of the cache in `0.0..=1.0`, or `None` for an empty cache.
    pub fn ratio(&self) -> Option<f64> {
        if self.total_bytes == 0 {
            None
        } else {
            Some(self.trimmable_bytes as f64 / self.total_bytes as f64)
        }
    }
}

/// The output of [`plan`]: classification, deletion targets and totals.
#[derive(Debug, Clone, Default)]
pub struct TrimPlan {
    /// Every cached version with its verdict.
    pub classified: Vec<ClassifiedEntry>,
    /// Targets ordered by name, then version.
    pub targets: Vec<TrimTarget>,
    /// Totals over `classified`.
    pub stats: TrimStats,
}

impl TrimPlan {
    /// Cache entries not referenced by any manifest.
    pub fn trimmable(&self) -> impl Iterator<Item = &CacheEntry> {
        self.classified
            .iter()
            .filter(|c| !c.is_used)
            .map(|c| &c.entry)
    }

    /// True when there is nothing to delete.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Build the deletion plan for `cache` against the used-set.
pub fn plan(cache: &CacheScan, used: &HashSet<PackageIdentity>) -> TrimPlan {
    let mut result = TrimPlan::default();
    let mut stats = TrimStats {
        used_pairs: used.len(),
        used_names: used
            .iter()
            .map(|id| &id.name)
            .collect::<HashSet<_>>()
            .len(),
        ..TrimStats::default()
    };

    for package in &cache.packages {
        if package.versions.is_empty() && !package.complete {
            continue;
        }
        if package.versions.is_empty() {
            stats.empty_packages += 1;
            result.targets.push(TrimTarget::Package {
                name: package.name.clone(),
                path: package.path.clone(),
                size_bytes: 0,
                versions: 0,
            });
            continue;
        }

        stats.cached_names += 1;
        let classified: Vec<ClassifiedEntry> = package
            .versions
            .iter()
            .map(|entry| ClassifiedEntry {
                is_used: used.contains(&entry.identity()),
                entry: entry.clone(),
            })
            .collect();

        let unused: Vec<&CacheEntry> = classified
            .iter()
            .filter(|c| !c.is_used)
            .map(|c| &c.entry)
            .collect();

        stats.cached_pairs += classified.len();
        stats.total_bytes += classified.iter().map(|c| c.entry.size_bytes).sum::<u64>();
        stats.trimmable_pairs += unused.len();
        let unused_bytes: u64 = unused.iter().map(|e| e.size_bytes).sum();
        stats.trimmable_bytes += unused_bytes;
        if !unused.is_empty() {
            stats.trimmable_names += 1;
        }

        if package.complete && unused.len() == classified.len() {
            result.targets.push(TrimTarget::Package {
                name: package.name.clone(),
                path: package.path.clone(),
                size_bytes: unused_bytes,
                versions: unused.len(),
            });
        } else {
            result
                .targets
                .extend(unused.iter().map(|entry| TrimTarget::Version {
                    name: entry.name.clone(),
                    version: entry.version.clone(),
                    path: entry.path.clone(),
                    size_bytes: entry.size_bytes,
                }));
        }

        result.classified.extend(classified);
    }

    result
        .targets
        .sort_by(|a, b| (a.name(), a.version()).cmp(&(b.name(), b.version())));
    result.stats = stats;
    result
}
