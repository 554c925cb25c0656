//! ntrim core: reconciles the NuGet global packages folder against the
//! packages actually used by a set of project trees.
//!
//! Data flows one way:
//!
//! ```text
//! manifests ──▶ usage::collect_used ──▶ used-set ─┐
//!                                                  ├─▶ plan::plan ──▶ TrimPlan
//! packages folder ──▶ cache::scan_cache ──────────┘
//! ```
//!
//! The engine never deletes anything; executing a [`TrimPlan`] is left to the
//! caller.

pub mod cache;
pub mod catalog;
pub mod error;
pub mod manifest;
pub mod paths;
pub mod plan;
pub mod usage;

pub mod reporter;

pub use cache::{
    CacheEntry, CacheScan, CachedPackage, ScanAnomaly, scan_cache, validate_cache_root,
};
pub use catalog::{format_ratio, format_size, write_cache_catalog, write_used_catalog};
pub use error::{ManifestError, TrimError};
pub use manifest::{JsonManifestParser, ManifestKind, ManifestParser, ManifestRecord};
pub use paths::*;
pub use plan::{ClassifiedEntry, TrimPlan, TrimStats, TrimTarget, plan};
pub use reporter::{NullReporter, Reporter};
pub use usage::{ManifestFailure, UsageReport, collect_used, validate_roots};
