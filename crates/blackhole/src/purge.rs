//! Emptying the target directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::PurgeError;
use crate::size::{DiskUsage, SizeCounter};
use crate::tracker::{ConsumptionTracker, StatusDisplay};

/// Removes one child of the directory being purged.
pub trait EntryRemover {
    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// Removal on the real filesystem. Symlinks are unlinked, never followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRemover;

impl EntryRemover for FsRemover {
    fn remove(&self, path: &Path) -> io::Result<()> {
        remove_entry(path)
    }
}

/// Deletes everything inside a directory, leaving the directory itself.
///
/// Removal is best-effort: an entry that cannot be removed is skipped and the
/// rest are still attempted. The tracker is credited with the size measured
/// *before* deletion, so skipped entries are still counted as eaten.
#[derive(Debug, Clone)]
pub struct DirectoryPurger<C = DiskUsage, R = FsRemover> {
    dir: PathBuf,
    counter: C,
    remover: R,
}

impl DirectoryPurger {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            counter: DiskUsage,
            remover: FsRemover,
        }
    }
}

impl<C: SizeCounter, R: EntryRemover> DirectoryPurger<C, R> {
    /// Replace the size counter used to measure the directory.
    pub fn with_counter<N: SizeCounter>(self, counter: N) -> DirectoryPurger<N, R> {
        DirectoryPurger {
            dir: self.dir,
            counter,
            remover: self.remover,
        }
    }

    /// Replace the way each child is deleted.
    pub fn with_remover<N: EntryRemover>(self, remover: N) -> DirectoryPurger<C, N> {
        DirectoryPurger {
            dir: self.dir,
            counter: self.counter,
            remover,
        }
    }

    /// Run one purge cycle and report the new total.
    ///
    /// Returns the number of bytes credited to the tracker. If the directory
    /// cannot be listed or sized, nothing is deleted and the tracker is left
    /// untouched.
    pub fn purge<D: StatusDisplay>(
        &self,
        tracker: &mut ConsumptionTracker<D>,
    ) -> Result<u64, PurgeError> {
        let children = list_children(&self.dir)?;
        let size = self.counter.size_of(&self.dir)?;

        for child in &children {
            if let Err(e) = self.remover.remove(child) {
                debug!(path = %child.display(), error = %e, "skipping entry");
            }
        }

        tracker.increment(size);
        tracker.report();
        Ok(size)
    }
}

fn list_children(dir: &Path) -> Result<Vec<PathBuf>, PurgeError> {
    let open_err = |source| PurgeError::Open {
        path: dir.to_path_buf(),
        source,
    };

    fs::read_dir(dir)
        .map_err(open_err)?
        .map(|entry| entry.map(|e| e.path()).map_err(open_err))
        .collect()
}

/// Remove a single child, recursing into real directories only.
fn remove_entry(path: &Path) -> io::Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        // Already gone.
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
