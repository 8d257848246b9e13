//! Running total of consumed bytes and the status line that shows it.

use std::io;

use tracing::debug;

/// Somewhere to show the status line.
///
/// Each call replaces whatever was shown before; for a terminal that means
/// clearing the screen first. The terminal implementation lives in the
/// `blackhole-term` crate.
pub trait StatusDisplay {
    fn show(&mut self, line: &str) -> io::Result<()>;
}

/// Accumulates the bytes purged across all cycles.
///
/// The tracker is the only owner of the total. It starts at zero, only ever
/// grows, and is gone when the process exits.
pub struct ConsumptionTracker<D> {
    total: i64,
    display: D,
}

impl<D: StatusDisplay> ConsumptionTracker<D> {
    pub fn new(display: D) -> Self {
        Self { total: 0, display }
    }

    /// Add `bytes` to the total, saturating at `i64::MAX`.
    pub fn increment(&mut self, bytes: u64) {
        let bytes = i64::try_from(bytes).unwrap_or(i64::MAX);
        self.total = self.total.saturating_add(bytes);
    }

    /// Total bytes consumed so far.
    pub fn total(&self) -> i64 {
        self.total
    }

    /// Total in whole kibibytes, truncated.
    pub fn kibibytes(&self) -> i64 {
        self.total >> 10
    }

    pub fn status_line(&self) -> String {
        format!("Black Hole has eaten {} KB", self.kibibytes())
    }

    /// Replace the displayed status with the current total.
    ///
    /// Display failures are not reported to the caller.
    pub fn report(&mut self) {
        let line = self.status_line();
        if let Err(e) = self.display.show(&line) {
            debug!(error = %e, "status display failed");
        }
    }
}
