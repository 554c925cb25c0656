//! Plan execution.

use crate::store::TrimStore;
use ntrim_core::{Reporter, TrimPlan};
use std::io;
use std::path::PathBuf;

/// Outcome of [`execute_plan`].
#[derive(Debug, Default)]
pub struct ExecutionReport {
    pub removed: usize,
    pub freed_bytes: u64,
    pub failures: Vec<(PathBuf, io::Error)>,
}

/// Delete every target in `plan` through `store`.
///
/// A failing target is reported by path and does not stop the remaining
/// deletions.
pub fn execute_plan<S: TrimStore, R: Reporter>(
    plan: &TrimPlan,
    store: &S,
    reporter: &R,
) -> ExecutionReport {
    let mut report = ExecutionReport::default();

    for target in &plan.targets {
        let name = target.name();
        let version = target.version();
        reporter.removing(name, version);

        match store.remove_dir(target.path()) {
            Ok(()) => {
                reporter.done(name, version, "removed", Some(target.size_bytes()));
                report.removed += 1;
                report.freed_bytes += target.size_bytes();
            }
            Err(e) => {
                tracing::warn!(path = %target.path().display(), error = %e, "failed to remove");
                reporter.failed(name, version, &e.to_string());
                report.failures.push((target.path().to_path_buf(), e));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntrim_core::{NullReporter, TrimTarget};
    use ntrim_schema::{PackageName, Version};
    use std::cell::RefCell;
    use std::path::Path;

    #[derive(Default)]
    struct MockStore {
        removed: RefCell<Vec<PathBuf>>,
        fail_on: Option<PathBuf>,
    }

    impl TrimStore for MockStore {
        fn remove_dir(&self, path: &Path) -> io::Result<()> {
            if self.fail_on.as_deref() == Some(path) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked"));
            }
            self.removed.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    fn sample_plan() -> TrimPlan {
        TrimPlan {
            targets: vec![
                TrimTarget::Package {
                    name: PackageName::new("bar"),
                    path: PathBuf::from("/cache/bar"),
                    size_bytes: 5,
                    versions: 1,
                },
                TrimTarget::Version {
                    name: PackageName::new("foo"),
                    version: Version::new("2.0.0"),
                    path: PathBuf::from("/cache/foo/2.0.0"),
                    size_bytes: 20,
                },
            ],
            ..TrimPlan::default()
        }
    }

    #[test]
    fn test_executes_every_target() {
        let store = MockStore::default();
        let report = execute_plan(&sample_plan(), &store, &NullReporter);

        assert_eq!(report.removed, 2);
        assert_eq!(report.freed_bytes, 25);
        assert!(report.failures.is_empty());
        assert_eq!(
            *store.removed.borrow(),
            vec![PathBuf::from("/cache/bar"), PathBuf::from("/cache/foo/2.0.0")]
        );
    }

    #[test]
    fn test_failure_does_not_stop_execution() {
        let store = MockStore {
            fail_on: Some(PathBuf::from("/cache/bar")),
            ..MockStore::default()
        };
        let report = execute_plan(&sample_plan(), &store, &NullReporter);

        assert_eq!(report.removed, 1);
        assert_eq!(report.freed_bytes, 20);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, PathBuf::from("/cache/bar"));
    }
}
