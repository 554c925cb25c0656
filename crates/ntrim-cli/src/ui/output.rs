//! Console output.
//!
//! `Output` is the CLI's [`Reporter`]: the engine reports phases and
//! anomalies through it, and commands use it for their own messages.
//! Warnings and errors go to stderr; everything else to stdout.

use super::theme::Theme;
use crossterm::style::Stylize;
use ntrim_core::{Reporter, format_size};
use ntrim_schema::{PackageName, Version};

/// A cloneable handle for writing styled messages to the terminal.
#[derive(Debug, Clone, Default)]
pub struct Output {
    theme: Theme,
    quiet: bool,
}

fn label(name: &PackageName, version: Option<&Version>) -> String {
    match version {
        Some(v) => format!("{name}/{v}"),
        None => name.to_string(),
    }
}

impl Output {
    /// Create a new output handle. `quiet` suppresses sections, info and
    /// per-package progress.
    pub fn new(quiet: bool) -> Self {
        Self {
            theme: Theme::default(),
            quiet,
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Prints a visual section header for an operation phase.
    pub fn section(&self, title: &str) {
        if self.quiet {
            return;
        }
        println!("{}", title.with(self.theme.colors.header));
    }

    /// Transitions a package display to the 'removing' state.
    pub fn removing(&self, name: &PackageName, version: Option<&Version>) {
        tracing::debug!(target = %label(name, version), "removing");
    }

    /// Signals completion of a removal.
    pub fn done(&self, name: &PackageName, version: Option<&Version>, detail: &str, size: Option<u64>) {
        if self.quiet {
            return;
        }
        let layout = &self.theme.layout;
        let name_part = format!("{:<width$}", label(name, version), width = layout.name_width);
        let size_part = format!(
            "{:>width$}",
            size.map(format_size).unwrap_or_default(),
            width = layout.size_width
        );
        println!(
            "  {} {} {}  {}",
            self.theme.icons.success.with(self.theme.colors.success),
            name_part.with(self.theme.colors.package_name),
            size_part.with(self.theme.colors.secondary),
            detail.with(self.theme.colors.secondary),
        );
    }

    /// Marks a removal as failed with a visible reason.
    pub fn failed(&self, name: &PackageName, version: Option<&Version>, reason: &str) {
        eprintln!(
            "  {} {} {}",
            self.theme.icons.error.with(self.theme.colors.error),
            label(name, version).with(self.theme.colors.package_name),
            reason.with(self.theme.colors.error),
        );
    }

    /// Prints an informational message to the console.
    pub fn info(&self, msg: &str) {
        if self.quiet {
            return;
        }
        println!("  {} {msg}", self.theme.icons.info.with(self.theme.colors.secondary));
    }

    /// Prints a success message to the console.
    pub fn success(&self, msg: &str) {
        println!("  {} {msg}", self.theme.icons.success.with(self.theme.colors.success));
    }

    /// Prints a warning message to stderr.
    pub fn warning(&self, msg: &str) {
        eprintln!(
            "  {} {}",
            self.theme.icons.warning.with(self.theme.colors.warning),
            msg.with(self.theme.colors.warning)
        );
    }

    /// Prints an error message to stderr.
    pub fn error(&self, msg: &str) {
        eprintln!(
            "  {} {}",
            self.theme.icons.error.with(self.theme.colors.error),
            msg.with(self.theme.colors.error)
        );
    }
}

impl Reporter for Output {
    fn section(&self, title: &str) {
        self.section(title);
    }

    fn removing(&self, name: &PackageName, version: Option<&Version>) {
        self.removing(name, version);
    }

    fn done(&self, name: &PackageName, version: Option<&Version>, detail: &str, size: Option<u64>) {
        self.done(name, version, detail, size);
    }

    fn failed(&self, name: &PackageName, version: Option<&Version>, reason: &str) {
        self.failed(name, version, reason);
    }

    fn info(&self, msg: &str) {
        self.info(msg);
    }

    fn success(&self, msg: &str) {
        self.success(msg);
    }

    fn warning(&self, msg: &str) {
        self.warning(msg);
    }

    fn error(&self, msg: &str) {
        self.error(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        let name = PackageName::new("Serilog");
        let version = Version::new("3.1.1");
        assert_eq!(label(&name, Some(&version)), "serilog/3.1.1");
        assert_eq!(label(&name, None), "serilog");
    }

    #[test]
    fn test_output_clone() {
        let output = Output::new(true);
        let output2 = output.clone();

        output.info("from original");
        output2.info("from clone");
        assert!(output2.is_quiet());
    }
}
