//! Deletion backend for trim plans.

use std::io;
use std::path::{Path, PathBuf};

/// Executes the destructive half of a trim.
///
/// Not synchronized: callers must not run two trims against the same cache
/// root at the same time.
pub trait TrimStore {
    /// Recursively delete `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the directory cannot be removed.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;
}

/// Deletes directories from the real filesystem, refusing anything outside
/// the cache root it was created for.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TrimStore for FsStore {
    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        if path == self.root || !path.starts_with(&self.root) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("refusing to delete {} outside {}", path.display(), self.root.display()),
            ));
        }
        std::fs::remove_dir_all(path)
    }
}
