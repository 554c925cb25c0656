//! Reporter trait for dependency injection
//!
//! This trait allows the engine to report progress and anomalies without
//! being coupled to a specific terminal implementation.

use ntrim_schema::{PackageName, Version};

pub trait Reporter: Send + Sync {
    /// Indicates a new phase has started (e.g. "Collecting packages.lock.json files").
    fn section(&self, title: &str);

    /// Updates the state of a package (or one of its versions) to 'removing'.
    fn removing(&self, name: &PackageName, version: Option<&Version>);

    /// Marks a removal as successfully completed.
    fn done(&self, name: &PackageName, version: Option<&Version>, detail: &str, size: Option<u64>);

    /// Marks a removal as failed with a specific reason.
    fn failed(&self, name: &PackageName, version: Option<&Version>, reason: &str);

    /// Log an informational message.
    fn info(&self, msg: &str);

    /// Log a success message.
    fn success(&self, msg: &str);

    /// Log a warning message (skipped manifests, unreadable cache entries).
    fn warning(&self, msg: &str);

    /// Log an error message.
    fn error(&self, msg: &str);
}

impl<T: Reporter + ?Sized> Reporter for std::sync::Arc<T> {
    fn section(&self, title: &str) {
        (**self).section(title);
    }
    fn removing(&self, name: &PackageName, version: Option<&Version>) {
        (**self).removing(name, version);
    }
    fn done(&self, name: &PackageName, version: Option<&Version>, detail: &str, size: Option<u64>) {
        (**self).done(name, version, detail, size);
    }
    fn failed(&self, name: &PackageName, version: Option<&Version>, reason: &str) {
        (**self).failed(name, version, reason);
    }
    fn info(&self, msg: &str) {
        (**self).info(msg);
    }
    fn success(&self, msg: &str) {
        (**self).success(msg);
    }
    fn warning(&self, msg: &str) {
        (**self).warning(msg);
    }
    fn error(&self, msg: &str) {
        (**self).error(msg);
    }
}

/// A no-op reporter for silent operations (e.g., testing).
#[derive(Debug, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn section(&self, _: &str) {}
    fn removing(&self, _: &PackageName, _: Option<&Version>) {}
    fn done(&self, _: &PackageName, _: Option<&Version>, _: &str, _: Option<u64>) {}
    fn failed(&self, _: &PackageName, _: Option<&Version>, _: &str) {}
    fn info(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warning(&self, _: &str) {}
    fn error(&self, _: &str) {}
}

/// Collects warnings so tests can assert on what was reported.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingReporter {
    pub(crate) warnings: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingReporter {
    pub(crate) fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn section(&self, _: &str) {}
    fn removing(&self, _: &PackageName, _: Option<&Version>) {}
    fn done(&self, _: &PackageName, _: Option<&Version>, _: &str, _: Option<u64>) {}
    fn failed(&self, _: &PackageName, _: Option<&Version>, _: &str) {}
    fn info(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warning(&self, msg: &str) {
        self.warnings.lock().unwrap().push(msg.to_string());
    }
    fn error(&self, _: &str) {}
}
