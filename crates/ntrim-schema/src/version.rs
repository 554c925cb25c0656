//! NuGet version parsing and normalization.
//!
//! The global packages folder stores each version under its normalized,
//! lower-cased spelling (`1.0.0`, `2.1.0-preview.1`), while manifests may
//! spell the same version as `1.0`, `1.0.0.0` or `1.0.0+sha.5d41402`.
//! [`normalize`] collapses all of these to the folder spelling.

use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Errors produced by the strict [`NuGetVersion::parse`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// The input was empty or whitespace only.
    #[error("Empty version string")]
    Empty,

    /// A numeric component was not a non-negative integer.
    #[error("Invalid numeric component '{0}'")]
    InvalidNumber(String),

    /// The numeric part had fewer than one or more than four components.
    #[error("Expected 1 to 4 numeric components, got {0}")]
    ComponentCount(usize),

    /// The pre-release label contained an empty or non-alphanumeric identifier.
    #[error("Invalid release label '{0}'")]
    InvalidLabel(String),
}

/// A parsed NuGet version: up to four numeric components plus an optional
/// dot-separated pre-release label. Build metadata is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NuGetVersion {
    /// Major component.
    pub major: u64,
    /// Minor component (0 when omitted).
    pub minor: u64,
    /// Patch component (0 when omitted).
    pub patch: u64,
    /// Legacy fourth component, only rendered when non-zero.
    pub revision: u64,
    /// Lower-cased pre-release identifiers (`["preview", "1"]`).
    pub release: Vec<String>,
}

impl NuGetVersion {
    /// Parse a version string.
    ///
    /// # Errors
    ///
    /// Returns a [`VersionError`] when the input is empty, has a malformed
    /// numeric part, or carries an invalid pre-release label.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }

        let without_metadata = trimmed.split_once('+').map_or(trimmed, |(v, _)| v);
        let (numeric, label) = match without_metadata.split_once('-') {
            Some((n, l)) => (n, Some(l)),
            None => (without_metadata, None),
        };

        let parts: Vec<&str> = numeric.split('.').collect();
        if parts.len() > 4 {
            return Err(VersionError::ComponentCount(parts.len()));
        }

        let mut numbers = [0u64; 4];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(VersionError::InvalidNumber((*part).to_string()));
            }
            *slot = part
                .parse()
                .map_err(|_| VersionError::InvalidNumber((*part).to_string()))?;
        }

        let release = match label {
            None => Vec::new(),
            Some(label) => {
                let ids: Vec<String> = label.split('.').map(str::to_ascii_lowercase).collect();
                let valid = ids.iter().all(|id| {
                    !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
                });
                if !valid {
                    return Err(VersionError::InvalidLabel(label.to_string()));
                }
                ids
            }
        };

        let [major, minor, patch, revision] = numbers;
        Ok(Self {
            major,
            minor,
            patch,
            revision,
            release,
        })
    }

    /// Whether the version carries a pre-release label.
    pub fn is_prerelease(&self) -> bool {
        !self.release.is_empty()
    }
}

impl fmt::Display for NuGetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.revision > 0 {
            write!(f, ".{}", self.revision)?;
        }
        if self.is_prerelease() {
            write!(f, "-{}", self.release.join("."))?;
        }
        Ok(())
    }
}

impl Ord for NuGetVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let numbers = (self.major, self.minor, self.patch, self.revision).cmp(&(
            other.major,
            other.minor,
            other.patch,
            other.revision,
        ));
        if numbers != Ordering::Equal {
            return numbers;
        }

        // A stable release sorts after any of its pre-releases.
        match (self.is_prerelease(), other.is_prerelease()) {
            (false, false) => Ordering::Equal,
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (true, true) => compare_labels(&self.release, &other.release),
        }
    }
}

impl PartialOrd for NuGetVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn compare_labels(a: &[String], b: &[String]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => x.cmp(y),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Normalize a version string to the spelling used by the packages folder.
///
/// Strings that do not parse as a NuGet version are trimmed and lower-cased,
/// so the function is total and idempotent.
pub fn normalize(input: &str) -> String {
    match NuGetVersion::parse(input) {
        Ok(version) => version.to_string(),
        Err(_) => input.trim().to_lowercase(),
    }
}
