//! Directory size accounting.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::TraversalError;

/// Computes how many bytes live under a path.
///
/// Implementations must be read-only. Any entry that cannot be inspected
/// fails the whole computation; no partial sums are returned.
pub trait SizeCounter {
    fn size_of(&self, path: &Path) -> Result<u64, TraversalError>;
}

/// Recursive on-disk size: the sum of every non-directory entry's length.
///
/// Symlinks are not followed. A link counts as its own entry, so its size is
/// the length of the link itself rather than of its target.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskUsage;

impl SizeCounter for DiskUsage {
    fn size_of(&self, path: &Path) -> Result<u64, TraversalError> {
        dir_size(path)
    }
}

/// Total byte size of all non-directory entries under `path`.
pub fn dir_size(path: &Path) -> Result<u64, TraversalError> {
    let fail = |source| TraversalError {
        path: path.to_path_buf(),
        source,
    };

    let mut total = 0u64;
    for entry in WalkDir::new(path) {
        let entry = entry.map_err(fail)?;
        if entry.file_type().is_dir() {
            continue;
        }
        let meta = entry.metadata().map_err(fail)?;
        total = total.saturating_add(meta.len());
    }
    Ok(total)
}
