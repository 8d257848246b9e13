//! Platform to clear-strategy mapping.

use std::collections::HashMap;

use crate::clear::ScreenClearer;

/// No clear strategy is registered for the running operating system.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported platform `{os}`: no way to clear the terminal screen")]
pub struct UnsupportedPlatform {
    pub os: String,
}

/// Maps operating system identifiers (as in [`std::env::consts::OS`]) to the
/// [`ScreenClearer`] used there.
///
/// The default registry knows `linux` and `windows`. Anything else has to be
/// registered explicitly.
#[derive(Debug, Clone)]
pub struct ClearRegistry {
    clearers: HashMap<String, ScreenClearer>,
}

impl Default for ClearRegistry {
    fn default() -> Self {
        Self::empty()
            .register("linux", ScreenClearer::Ansi)
            .register("windows", ScreenClearer::command("cmd", ["/c", "cls"]))
    }
}

impl ClearRegistry {
    /// A registry with no platforms.
    pub fn empty() -> Self {
        Self {
            clearers: HashMap::new(),
        }
    }

    /// Add or replace the strategy for `os`.
    pub fn register(mut self, os: impl Into<String>, clearer: ScreenClearer) -> Self {
        self.clearers.insert(os.into(), clearer);
        self
    }

    pub fn resolve(&self, os: &str) -> Result<ScreenClearer, UnsupportedPlatform> {
        self.clearers
            .get(os)
            .cloned()
            .ok_or_else(|| UnsupportedPlatform { os: os.to_string() })
    }

    /// Strategy for the operating system this binary was built for.
    pub fn for_current_platform(&self) -> Result<ScreenClearer, UnsupportedPlatform> {
        self.resolve(std::env::consts::OS)
    }
}
