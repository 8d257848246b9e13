//! Terminal output for blackhole.
//!
//! Clearing a terminal is platform specific, so the strategy is looked up
//! once at startup in a [`ClearRegistry`] and handed to a [`Screen`], which
//! implements [`blackhole::StatusDisplay`].
//!
//! ```ignore
//! use blackhole_term::{ClearRegistry, Screen};
//!
//! let clearer = ClearRegistry::default().for_current_platform()?;
//! let screen = Screen::stdout(clearer);
//! ```

mod clear;
mod registry;
mod screen;

pub use clear::ScreenClearer;
pub use registry::{ClearRegistry, UnsupportedPlatform};
pub use screen::Screen;
