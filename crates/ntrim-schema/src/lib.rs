//! Shared types for ntrim: package identities, NuGet version normalization
//! and the manifest file formats read from project trees.

pub mod manifest;
pub mod types;
pub mod version;

// Re-exports
pub use manifest::{
    AssetsFile, AssetsLibrary, DependencyType, DotnetTool, DotnetToolsFile, LibraryType,
    LockedDependency, PackagesLockFile,
};
pub use types::*;
pub use version::{NuGetVersion, VersionError};
