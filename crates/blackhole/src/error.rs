//! Error types.
//!
//! Only three things can go wrong in a way that matters: the target
//! directory cannot be listed, it cannot be sized, or the process cannot
//! set itself up (create the directory, install signal listeners). Failures
//! to remove an individual entry are not errors at all; the purger skips
//! them.

use std::io;
use std::path::PathBuf;

/// A directory walk hit an entry it could not stat or read.
///
/// Whatever was summed before the failure is discarded.
#[derive(Debug, thiserror::Error)]
#[error("failed to traverse {}: {source}", .path.display())]
pub struct TraversalError {
    /// Root of the walk that failed.
    pub path: PathBuf,
    #[source]
    pub source: walkdir::Error,
}

/// A purge cycle was aborted before any deletion happened.
#[derive(Debug, thiserror::Error)]
pub enum PurgeError {
    /// The directory could not be opened or its children listed.
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The pre-deletion size could not be computed.
    #[error("failed to size directory before purging: {0}")]
    Size(#[from] TraversalError),
}

/// Fatal errors surfaced by the scheduler and lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Purge(#[from] PurgeError),

    /// The target directory could not be created.
    #[error("failed to prepare {}: {source}", .path.display())]
    Lifecycle {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Termination signal listeners could not be installed.
    #[error("failed to install signal handler: {0}")]
    Signal(#[source] io::Error),
}
