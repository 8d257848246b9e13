//! Runtime configuration with the tool's fixed defaults.
//!
//! The binary takes no arguments and always runs with
//! [`BlackHoleConfig::default`]; the builder methods exist for embedding and
//! for tests that need a scratch directory or a faster tick.

use std::path::PathBuf;
use std::time::Duration;

/// Directory name used when none is configured.
pub const DEFAULT_TARGET_DIR: &str = "hole";

/// Time between purge cycles.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Where to purge and how often.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlackHoleConfig {
    /// Directory whose contents are eaten. Default: `hole`, relative to the
    /// working directory.
    pub target_dir: PathBuf,
    /// Time between purge cycles. Default: 500ms.
    pub interval: Duration,
}

impl Default for BlackHoleConfig {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from(DEFAULT_TARGET_DIR),
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl BlackHoleConfig {
    pub fn with_target_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.target_dir = dir.into();
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}
