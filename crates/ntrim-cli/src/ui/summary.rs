//! Summary and plan rendering for `ntrim trim` / `ntrim scan`.

use super::theme::Theme;
use crossterm::style::Stylize;
use ntrim_core::{TrimStats, TrimTarget, format_ratio, format_size};

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// `"12 versions of 8 packages"`
pub fn versions_of(pairs: usize, names: usize) -> String {
    format!("{} of {}", plural(pairs, "version"), plural(names, "package"))
}

/// The summary lines as `(label, value)` pairs, in display order.
pub fn summary_rows(stats: &TrimStats) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("In use:", versions_of(stats.used_pairs, stats.used_names)),
        ("Cached:", versions_of(stats.cached_pairs, stats.cached_names)),
        (
            "Trimmable:",
            versions_of(stats.trimmable_pairs, stats.trimmable_names),
        ),
    ];
    if stats.empty_packages > 0 {
        rows.push((
            "Empty:",
            format!("{} without versions", plural(stats.empty_packages, "package")),
        ));
    }
    rows.push(("Total size:", format_size(stats.total_bytes)));
    rows.push((
        "Reclaimable:",
        format!(
            "{} ({})",
            format_size(stats.trimmable_bytes),
            format_ratio(stats.ratio())
        ),
    ));
    rows
}

/// Print the run summary.
pub fn print_summary(stats: &TrimStats) {
    let theme = Theme::default();
    let label_width = theme.layout.label_width + 2;

    println!();
    println!("{}", "Cache summary".dark_grey());
    println!();
    for (label, value) in summary_rows(stats) {
        println!("{label:<label_width$}{value}");
    }
    println!();
}

/// Print the deletion targets, one per line, with their sizes.
pub fn print_plan(targets: &[TrimTarget]) {
    let theme = Theme::default();

    for target in targets {
        let name_part = format!(
            "{:<width$}",
            target.to_string(),
            width = theme.layout.name_width + theme.layout.version_width
        );
        let size_part = format!(
            "{:>width$}",
            format_size(target.size_bytes()),
            width = theme.layout.size_width
        );
        println!(
            "  {} {}  {}",
            name_part.with(theme.colors.package_name),
            size_part.with(theme.colors.secondary),
            target.path().display().to_string().dark_grey()
        );
    }
}
