//! Well-known NuGet locations.

use dirs::home_dir;
use std::path::PathBuf;

/// Environment variable NuGet uses to relocate the global packages folder.
pub const NUGET_PACKAGES_ENV: &str = "NUGET_PACKAGES";

/// Returns the per-user NuGet directory (`~/.nuget`), or None if the user's
/// home cannot be resolved.
pub fn try_nuget_home() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".nuget"))
}

/// Returns the global packages folder: `$NUGET_PACKAGES` when set and
/// non-empty, `~/.nuget/packages` otherwise.
pub fn try_default_cache_root() -> Option<PathBuf> {
    if let Ok(val) = std::env::var(NUGET_PACKAGES_ENV) {
        if !val.trim().is_empty() {
            return Some(PathBuf::from(val));
        }
    }
    try_nuget_home().map(|h| h.join("packages"))
}
