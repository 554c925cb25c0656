//! Trim command (and its read-only `scan` alias)

use crate::ops::{confirm, execute_plan};
use crate::store::FsStore;
use crate::ui::Output;
use crate::ui::summary::{print_plan, print_summary, versions_of};
use anyhow::{Context, Result, bail};
use ntrim_core::{
    JsonManifestParser, TrimPlan, UsageReport, collect_used, format_size, plan, scan_cache,
    try_default_cache_root, validate_cache_root, validate_roots, write_cache_catalog,
    write_used_catalog,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Everything `ntrim trim` needs, resolved from the command line.
#[derive(Debug, Clone, Default)]
pub struct TrimOptions {
    pub roots: Vec<PathBuf>,
    pub cache: Option<PathBuf>,
    pub used_out: Option<PathBuf>,
    pub cached_out: Option<PathBuf>,
    pub yes: bool,
    pub dry_run: bool,
}

/// Find unused packages in the global packages folder and delete them
pub fn trim(options: &TrimOptions, output: &Output) -> Result<()> {
    let roots = if options.roots.is_empty() {
        vec![prompt_root()?]
    } else {
        options.roots.clone()
    };
    validate_roots(&roots)?;

    let cache_root = match &options.cache {
        Some(dir) => dir.clone(),
        None => try_default_cache_root()
            .context("Could not determine the NuGet packages folder. Pass --cache or set NUGET_PACKAGES.")?,
    };
    validate_cache_root(&cache_root)?;

    let usage = collect_used(&roots, &JsonManifestParser, output);
    report_usage(&usage, output);

    output.section(&format!("Collecting {}", cache_root.display()));
    let scan = scan_cache(&cache_root, output)?;
    let trim_plan = plan(&scan, &usage.used);

    if let Some(path) = &options.used_out {
        write_catalog(path, |w| write_used_catalog(w, &usage.used))?;
        output.info(&format!("Wrote used packages to {}", path.display()));
    }
    if let Some(path) = &options.cached_out {
        write_catalog(path, |w| write_cache_catalog(w, &trim_plan))?;
        output.info(&format!("Wrote cached packages to {}", path.display()));
    }

    print_summary(&trim_plan.stats);

    if trim_plan.is_empty() {
        output.success("Nothing to trim.");
        return Ok(());
    }

    if options.dry_run {
        output.section(&format!("Would remove {} directories:", trim_plan.targets.len()));
        print_plan(&trim_plan.targets);
        return Ok(());
    }

    if !options.yes && !confirm_plan(&trim_plan)? {
        output.error("Operation cancelled");
        return Ok(());
    }

    output.section("Removing");
    let store = FsStore::new(&cache_root);
    let report = execute_plan(&trim_plan, &store, output);

    if report.failures.is_empty() {
        output.success(&format!(
            "Removed {} directories, freed {}",
            report.removed,
            format_size(report.freed_bytes)
        ));
        Ok(())
    } else {
        bail!(
            "Removed {} directories ({}), {} failed",
            report.removed,
            format_size(report.freed_bytes),
            report.failures.len()
        )
    }
}

fn report_usage(usage: &UsageReport, output: &Output) {
    output.info(&format!(
        "Read {} manifests; {} in use.",
        usage.manifests_read,
        versions_of(usage.used.len(), usage.distinct_names())
    ));
    if !usage.failures.is_empty() {
        output.warning(&format!("{} manifests could not be parsed", usage.failures.len()));
    }
}

fn confirm_plan(trim_plan: &TrimPlan) -> Result<bool> {
    let prompt = format!(
        "Delete {} directories ({})?",
        trim_plan.targets.len(),
        format_size(trim_plan.stats.trimmable_bytes)
    );
    let stdin = std::io::stdin();
    confirm(&prompt, stdin.lock(), std::io::stdout()).context("Failed to read confirmation")
}

fn prompt_root() -> Result<PathBuf> {
    print!("Root directory: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read root directory")?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        bail!("No root directory given");
    }
    Ok(PathBuf::from(trimmed))
}

fn write_catalog<F>(path: &Path, render: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    render(&mut writer).with_context(|| format!("Failed to write {}", path.display()))
}
