//! Startup and shutdown of the target directory.
//!
//! The directory is created when the process starts (if it is missing) and
//! removed when the process is asked to terminate. Termination requests
//! arrive as OS signals; [`spawn_listener`] waits for the first one on its
//! own task and hands it to the scheduler over a oneshot channel.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::error::Error;

// ── Target directory ───────────────────────────────────────────────

/// The directory whose contents get eaten.
#[derive(Debug, Clone)]
pub struct TargetDirectory {
    path: PathBuf,
}

impl TargetDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the directory (mode 0755 on unix) if nothing exists at the path.
    ///
    /// An existing entry is left alone even if it is not a directory; the
    /// first purge will then fail to open it.
    pub fn ensure(&self) -> Result<(), Error> {
        match fs::metadata(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            _ => return Ok(()),
        }

        #[cfg_attr(not(unix), allow(unused_mut))]
        let mut builder = fs::DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }
        builder.create(&self.path).map_err(|source| Error::Lifecycle {
            path: self.path.clone(),
            source,
        })?;

        info!(path = %self.path.display(), "created target directory");
        Ok(())
    }

    /// Remove the directory and anything left in it. Errors are ignored.
    pub fn remove(&self) {
        match fs::remove_dir_all(&self.path) {
            Ok(()) => info!(path = %self.path.display(), "removed target directory"),
            Err(e) => debug!(path = %self.path.display(), error = %e, "could not remove target directory"),
        }
    }
}

// ── Termination signals ────────────────────────────────────────────

#[cfg(unix)]
mod platform {
    use std::future::poll_fn;
    use std::task::Poll;

    use nix::sys::signal::Signal;
    use tokio::signal::unix::{self, SignalKind};
    use tracing::debug;

    use crate::error::Error;

    /// Signals treated as a request to shut down.
    const TERMINATION_SIGNALS: [Signal; 6] = [
        Signal::SIGHUP,
        Signal::SIGINT,
        Signal::SIGKILL,
        Signal::SIGTERM,
        Signal::SIGABRT,
        Signal::SIGQUIT,
    ];

    /// Installed listeners for every catchable termination signal.
    pub struct ShutdownSignals {
        listeners: Vec<(&'static str, unix::Signal)>,
    }

    impl ShutdownSignals {
        /// Install the listeners. Must be called inside a tokio runtime.
        ///
        /// `SIGKILL` is in the set but can never be caught, so it is
        /// skipped.
        pub fn register() -> Result<Self, Error> {
            let mut listeners = Vec::with_capacity(TERMINATION_SIGNALS.len());
            for sig in TERMINATION_SIGNALS {
                match unix::signal(SignalKind::from_raw(sig as i32)) {
                    Ok(stream) => listeners.push((sig.as_str(), stream)),
                    Err(e) if sig == Signal::SIGKILL => {
                        debug!(signal = sig.as_str(), error = %e, "signal cannot be caught");
                    }
                    Err(e) => return Err(Error::Signal(e)),
                }
            }
            Ok(Self { listeners })
        }

        /// Wait for the first termination signal and return its name.
        pub async fn recv(mut self) -> &'static str {
            poll_fn(|cx| {
                for (name, stream) in self.listeners.iter_mut() {
                    if stream.poll_recv(cx).is_ready() {
                        return Poll::Ready(*name);
                    }
                }
                Poll::Pending
            })
            .await
        }
    }
}

#[cfg(windows)]
mod platform {
    use tokio::signal::windows::{self, CtrlBreak, CtrlC, CtrlClose, CtrlShutdown};

    use crate::error::Error;

    /// Installed listeners for the console control events that end a process.
    pub struct ShutdownSignals {
        ctrl_c: CtrlC,
        ctrl_break: CtrlBreak,
        ctrl_close: CtrlClose,
        ctrl_shutdown: CtrlShutdown,
    }

    impl ShutdownSignals {
        /// Install the listeners. Must be called inside a tokio runtime.
        pub fn register() -> Result<Self, Error> {
            Ok(Self {
                ctrl_c: windows::ctrl_c().map_err(Error::Signal)?,
                ctrl_break: windows::ctrl_break().map_err(Error::Signal)?,
                ctrl_close: windows::ctrl_close().map_err(Error::Signal)?,
                ctrl_shutdown: windows::ctrl_shutdown().map_err(Error::Signal)?,
            })
        }

        /// Wait for the first control event and return its name.
        pub async fn recv(mut self) -> &'static str {
            tokio::select! {
                _ = self.ctrl_c.recv() => "ctrl-c",
                _ = self.ctrl_break.recv() => "ctrl-break",
                _ = self.ctrl_close.recv() => "ctrl-close",
                _ = self.ctrl_shutdown.recv() => "ctrl-shutdown",
            }
        }
    }
}

pub use platform::ShutdownSignals;

/// Wait for the first termination signal on a separate task.
///
/// The returned receiver resolves with the signal's name. Only the first
/// signal is handled; the listeners are dropped after it fires.
pub fn spawn_listener(signals: ShutdownSignals) -> oneshot::Receiver<&'static str> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let name = signals.recv().await;
        info!(signal = name, "termination signal received");
        let _ = tx.send(name);
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let target = TargetDirectory::new(tmp.path().join("hole"));

        target.ensure().unwrap();
        assert!(target.path().is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn ensure_uses_standard_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let target = TargetDirectory::new(tmp.path().join("hole"));
        target.ensure().unwrap();

        // The process umask can only clear bits, never add them.
        let mode = fs::metadata(target.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode & !0o755, 0, "unexpected mode {mode:o}");
        assert_eq!(mode & 0o700, 0o700);
    }

    #[test]
    fn ensure_leaves_existing_contents_alone() {
        let tmp = tempfile::tempdir().unwrap();
        let target = TargetDirectory::new(tmp.path().join("hole"));
        fs::create_dir(target.path()).unwrap();
        fs::write(target.path().join("snack"), b"crumbs").unwrap();

        target.ensure().unwrap();
        assert!(target.path().join("snack").exists());
    }

    #[test]
    fn ensure_does_not_replace_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let target = TargetDirectory::new(tmp.path().join("hole"));
        fs::write(target.path(), b"not a directory").unwrap();

        target.ensure().unwrap();
        assert!(target.path().is_file());
    }

    #[test]
    fn ensure_reports_creation_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let target = TargetDirectory::new(tmp.path().join("missing-parent/hole"));

        let err = target.ensure().unwrap_err();
        assert!(matches!(err, Error::Lifecycle { .. }));
    }

    #[test]
    fn remove_takes_leftovers_with_it() {
        let tmp = tempfile::tempdir().unwrap();
        let target = TargetDirectory::new(tmp.path().join("hole"));
        target.ensure().unwrap();
        fs::create_dir(target.path().join("half-eaten")).unwrap();
        fs::write(target.path().join("half-eaten/bite"), b"x").unwrap();

        target.remove();
        assert!(!target.path().exists());
    }

    #[test]
    fn remove_of_missing_directory_is_quiet() {
        let tmp = tempfile::tempdir().unwrap();
        let target = TargetDirectory::new(tmp.path().join("never-made"));
        target.remove();
        assert!(!target.path().exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn listener_reports_first_signal() {
        use nix::sys::signal::{Signal, raise};
        use std::time::Duration;

        let signals = ShutdownSignals::register().unwrap();
        let rx = spawn_listener(signals);
        raise(Signal::SIGHUP).unwrap();

        let name = tokio::time::timeout(Duration::from_secs(5), rx)
            .await
            .expect("signal was not delivered")
            .unwrap();
        assert_eq!(name, "SIGHUP");
    }
}
