//! ntrim - trim the NuGet global packages folder
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Scans project trees for restore artifacts (`project.assets.json`,
//! `project.lock.json`, `packages.lock.json`, `dotnet-tools.json`), works out
//! which package versions are still referenced, and removes everything else
//! from `~/.nuget/packages`.
//!
//! # Flow
//!
//! ```text
//! roots ──▶ used-set ─┐
//!                     ├─▶ plan ──▶ summary ──▶ confirm ──▶ FsStore
//! cache ──▶ entries ──┘
//! ```

pub mod cmd;
pub mod ops;
pub mod store;
pub mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ntrim")]
#[command(author, version = env!("NTRIM_VERSION"), about = "ntrim - remove unused packages from the NuGet cache")]
pub struct Cli {
    /// Show what would be removed without deleting anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by `trim` and `scan`.
#[derive(Debug, Clone, clap::Args)]
pub struct ScanArgs {
    /// Project root directories to search for restore artifacts (prompted when omitted)
    pub roots: Vec<PathBuf>,
    /// Global packages folder [default: $NUGET_PACKAGES or ~/.nuget/packages]
    #[arg(long, value_name = "DIR")]
    pub cache: Option<PathBuf>,
    /// Write the used package list (name/version per line) to this file
    #[arg(long, value_name = "FILE")]
    pub used_out: Option<PathBuf>,
    /// Write the cached package list, with trimmable entries marked, to this file
    #[arg(long, value_name = "FILE")]
    pub cached_out: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Remove cached packages no scanned project uses
    Trim {
        #[command(flatten)]
        args: ScanArgs,
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Report what `trim` would remove, without deleting anything
    Scan {
        #[command(flatten)]
        args: ScanArgs,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

impl ScanArgs {
    /// Resolve into options for [`cmd::trim::trim`].
    pub fn into_options(self, yes: bool, dry_run: bool) -> cmd::trim::TrimOptions {
        cmd::trim::TrimOptions {
            roots: self.roots,
            cache: self.cache,
            used_out: self.used_out,
            cached_out: self.cached_out,
            yes,
            dry_run,
        }
    }
}
