//! On-disk manifest formats that record which packages a project uses.
//!
//! Only the fields needed to decide "is this package version in use" are
//! modelled; everything else in the files is ignored by serde.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `obj/project.assets.json`, the full restore snapshot. The legacy
/// `project.lock.json` shares the same layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsFile {
    /// File format version (3 for current SDKs, 1 or 2 for `project.lock.json`).
    pub version: u32,

    /// Libraries keyed by `"<Id>/<Version>"`.
    #[serde(default)]
    pub libraries: BTreeMap<String, AssetsLibrary>,
}

impl AssetsFile {
    /// Highest `version` this reader understands.
    pub const MAX_VERSION: u32 = 3;

    /// Split a library key into its id and version parts.
    pub fn split_key(key: &str) -> Option<(&str, &str)> {
        key.split_once('/')
    }
}

/// Kind of a library entry in an assets file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryType {
    /// A package restored into the global packages folder.
    #[default]
    Package,
    /// A project reference inside the same solution.
    Project,
    /// Any other kind (e.g. legacy `reference` entries).
    #[serde(other)]
    Other,
}

/// One entry of [`AssetsFile::libraries`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsLibrary {
    /// Library kind.
    #[serde(rename = "type", default)]
    pub kind: LibraryType,

    /// Relative path inside the packages folder.
    pub path: Option<String>,

    /// Path to the referenced `.csproj`, only present for project references.
    pub msbuild_project: Option<String>,

    /// Package content hash.
    pub sha512: Option<String>,
}

impl AssetsLibrary {
    /// Whether this entry is an in-solution project rather than a package.
    pub fn is_project(&self) -> bool {
        self.kind == LibraryType::Project || self.msbuild_project.is_some()
    }
}

/// `packages.lock.json`, the repeatable-restore lock file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagesLockFile {
    /// File format version.
    pub version: u32,

    /// Target framework → package id → locked entry.
    #[serde(default)]
    pub dependencies: BTreeMap<String, BTreeMap<String, LockedDependency>>,
}

impl PackagesLockFile {
    /// Highest `version` this reader understands.
    pub const MAX_VERSION: u32 = 2;
}

/// How a dependency entered a lock file target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DependencyType {
    /// Declared directly by the project.
    Direct,
    /// Pulled in by another dependency.
    Transitive,
    /// A project reference inside the same solution.
    #[serde(alias = "project")]
    Project,
    /// Transitive dependency pinned by central package management.
    CentralTransitive,
    /// A type this reader does not know about.
    #[serde(other)]
    Unknown,
}

/// One entry in a [`PackagesLockFile`] target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockedDependency {
    /// Dependency type.
    #[serde(rename = "type")]
    pub kind: DependencyType,

    /// Requested version range, for direct dependencies.
    pub requested: Option<String>,

    /// Version chosen by restore; absent for project references.
    pub resolved: Option<String>,

    /// Package content hash.
    pub content_hash: Option<String>,
}

/// `dotnet-tools.json`, the local tool manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DotnetToolsFile {
    /// File format version.
    pub version: u32,

    /// Whether tool lookup stops at this manifest.
    #[serde(default)]
    pub is_root: bool,

    /// Tools keyed by package id.
    pub tools: BTreeMap<String, DotnetTool>,
}

impl DotnetToolsFile {
    /// File name of a tool manifest.
    pub const FILE_NAME: &'static str = "dotnet-tools.json";

    /// Highest `version` this reader understands.
    pub const MAX_VERSION: u32 = 1;
}

/// One entry of [`DotnetToolsFile::tools`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DotnetTool {
    /// Exact tool package version.
    pub version: String,

    /// Commands exposed by the tool.
    #[serde(default)]
    pub commands: Vec<String>,

    /// Whether the tool may roll forward to a newer runtime.
    #[serde(default)]
    pub roll_forward: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assets_file_marks_project_references() {
        let json = r#"{
            "version": 3,
            "targets": { "net8.0": {} },
            "libraries": {
                "Newtonsoft.Json/13.0.3": {
                    "sha512": "abc",
                    "type": "package",
                    "path": "newtonsoft.json/13.0.3",
                    "files": ["lib/net6.0/Newtonsoft.Json.dll"]
                },
                "Shared/1.0.0": {
                    "type": "project",
                    "path": "../Shared/Shared.csproj",
                    "msbuildProject": "../Shared/Shared.csproj"
                }
            }
        }"#;

        let assets: AssetsFile = serde_json::from_str(json).unwrap();
        assert_eq!(assets.version, 3);
        assert!(!assets.libraries["Newtonsoft.Json/13.0.3"].is_project());
        assert!(assets.libraries["Shared/1.0.0"].is_project());
    }

    #[test]
    fn test_assets_library_msbuild_project_alone_means_project() {
        let lib = AssetsLibrary {
            msbuild_project: Some("../Lib/Lib.csproj".to_string()),
            ..AssetsLibrary::default()
        };
        assert!(lib.is_project());
    }

    #[test]
    fn test_assets_split_key() {
        assert_eq!(
            AssetsFile::split_key("Serilog/2.10.0"),
            Some(("Serilog", "2.10.0"))
        );
        assert_eq!(AssetsFile::split_key("Serilog"), None);
    }

    #[test]
    fn test_packages_lock_dependency_types() {
        let json = r#"{
            "version": 1,
            "dependencies": {
                "net8.0": {
                    "Serilog": {
                        "type": "Direct",
                        "requested": "[3.1.1, )",
                        "resolved": "3.1.1",
                        "contentHash": "xyz"
                    },
                    "Shared": { "type": "Project" },
                    "Odd": { "type": "SomethingNew", "resolved": "1.0.0" }
                }
            }
        }"#;

        let lock: PackagesLockFile = serde_json::from_str(json).unwrap();
        let target = &lock.dependencies["net8.0"];
        assert_eq!(target["Serilog"].kind, DependencyType::Direct);
        assert_eq!(target["Serilog"].resolved.as_deref(), Some("3.1.1"));
        assert_eq!(target["Shared"].kind, DependencyType::Project);
        assert_eq!(target["Shared"].resolved, None);
        assert_eq!(target["Odd"].kind, DependencyType::Unknown);
    }

    #[test]
    fn test_tools_manifest() {
        let json = r#"{
            "version": 1,
            "isRoot": true,
            "tools": {
                "dotnet-ef": { "version": "8.0.0", "commands": ["dotnet-ef"] },
                "csharpier": { "version": "0.27.3", "commands": ["dotnet-csharpier"], "rollForward": false }
            }
        }"#;

        let tools: DotnetToolsFile = serde_json::from_str(json).unwrap();
        assert!(tools.is_root);
        assert_eq!(tools.tools.len(), 2);
        assert_eq!(tools.tools["dotnet-ef"].version, "8.0.0");
    }

    #[test]
    fn test_tools_manifest_requires_tools() {
        let result: Result<DotnetToolsFile, _> = serde_json::from_str(r#"{ "version": 1 }"#);
        assert!(result.is_err());
    }
}
