//! Audit catalogs and human-readable formatting.

use crate::plan::TrimPlan;
use ntrim_schema::PackageIdentity;
use std::collections::HashSet;
use std::io::{self, Write};

const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// Suffix appended to trimmable lines in the cache catalog.
pub const TRIMMABLE_MARKER: &str = " [trimmable]";

/// Write the used-set as `name/version` lines sorted by name, then version.
///
/// # Errors
///
/// Propagates write errors from `sink`.
pub fn write_used_catalog<W: Write>(mut sink: W, used: &HashSet<PackageIdentity>) -> io::Result<()> {
    let mut sorted: Vec<&PackageIdentity> = used.iter().collect();
    sorted.sort();
    for id in sorted {
        writeln!(sink, "{id}")?;
    }
    sink.flush()
}

/// Write every cached entry as a `name/version` line, marking trimmable ones.
///
/// # Errors
///
/// Propagates write errors from `sink`.
pub fn write_cache_catalog<W: Write>(mut sink: W, plan: &TrimPlan) -> io::Result<()> {
    let mut rows: Vec<(PackageIdentity, bool)> = plan
        .classified
        .iter()
        .map(|c| (c.entry.identity(), c.is_used))
        .collect();
    rows.sort();
    for (id, is_used) in rows {
        if is_used {
            writeln!(sink, "{id}")?;
        } else {
            writeln!(sink, "{id}{TRIMMABLE_MARKER}")?;
        }
    }
    sink.flush()
}

/// Format bytes with the largest binary unit that keeps the value below 1024.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    // Compare the rounded mantissa so 1023.999 KiB renders as 1.00 MiB.
    while unit < UNITS.len() - 1 && (value * 100.0).round() / 100.0 >= 1024.0 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

/// Format a trim ratio as a percentage, `N/A` when undefined.
pub fn format_ratio(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) => format!("{:.2}%", r * 100.0),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheEntry, CacheScan, CachedPackage};
    use crate::plan::plan;
    use ntrim_schema::{PackageName, Version};
    use std::path::PathBuf;

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(0), "0.00 B");
        assert_eq!(format_size(35), "35.00 B");
        assert_eq!(format_size(1023), "1023.00 B");
        assert_eq!(format_size(1024), "1.00 KiB");
        assert_eq!(format_size(1536), "1.50 KiB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MiB");
        assert_eq!(format_size(1024 * 1024 * 1024), "1.00 GiB");
        assert_eq!(format_size(3 * 1024_u64.pow(4)), "3.00 TiB");
    }

    #[test]
    fn test_format_size_rounds_up_to_next_unit() {
        assert_eq!(format_size(1024 * 1024 - 1), "1.00 MiB");
    }

    #[test]
    fn test_format_size_caps_at_tebibytes() {
        assert_eq!(format_size(2048 * 1024_u64.pow(4)), "2048.00 TiB");
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(Some(25.0 / 35.0)), "71.43%");
        assert_eq!(format_ratio(Some(1.0)), "100.00%");
        assert_eq!(format_ratio(None), "N/A");
    }

    #[test]
    fn test_used_catalog_is_sorted() {
        let used: HashSet<PackageIdentity> = [
            ("Serilog", "3.1.1"),
            ("Newtonsoft.Json", "13.0.3"),
            ("Newtonsoft.Json", "9.0.1"),
        ]
        .iter()
        .map(|(n, v)| PackageIdentity::normalize(n, v))
        .collect();

        let mut out = Vec::new();
        write_used_catalog(&mut out, &used).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "newtonsoft.json/9.0.1\nnewtonsoft.json/13.0.3\nserilog/3.1.1\n"
        );
    }

    #[test]
    fn test_cache_catalog_marks_trimmable() {
        let entry = |name: &str, version: &str| CacheEntry {
            name: PackageName::new(name),
            version: Version::new(version),
            path: PathBuf::from("/cache").join(name).join(version),
            size_bytes: 1,
        };
        let cache = CacheScan {
            root: PathBuf::from("/cache"),
            packages: vec![CachedPackage {
                name: PackageName::new("foo"),
                path: PathBuf::from("/cache/foo"),
                versions: vec![entry("foo", "1.0.0"), entry("foo", "2.0.0")],
                complete: true,
            }],
            anomalies: Vec::new(),
        };
        let used = HashSet::from([PackageIdentity::normalize("foo", "2.0.0")]);
        let plan = plan(&cache, &used);

        let mut out = Vec::new();
        write_cache_catalog(&mut out, &plan).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "foo/1.0.0 [trimmable]\nfoo/2.0.0\n"
        );
    }
}
