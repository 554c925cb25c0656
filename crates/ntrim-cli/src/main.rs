//! ntrim CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ntrim_cli::cmd;
use ntrim_cli::ui::Output;
use ntrim_cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = Output::new(cli.quiet);

    match cli.command {
        Commands::Trim { args, yes } => {
            cmd::trim::trim(&args.into_options(yes, cli.dry_run), &output)
        }
        Commands::Scan { args } => cmd::trim::trim(&args.into_options(false, true), &output),
        Commands::Completions { shell } => {
            cmd::completions::completions(shell);
            Ok(())
        }
    }
}
