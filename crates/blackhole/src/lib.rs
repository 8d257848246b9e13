//! A directory that eats whatever is put into it.
//!
//! Every tick the [`Scheduler`] empties the target directory with a
//! [`DirectoryPurger`], credits the bytes it measured beforehand to a
//! [`ConsumptionTracker`], and shows the running total on a
//! [`StatusDisplay`]. When the process is asked to terminate, the target
//! directory itself is removed.
//!
//! ```ignore
//! use blackhole::{BlackHoleConfig, Scheduler, ShutdownSignals, spawn_listener};
//!
//! let signals = ShutdownSignals::register()?;
//! let shutdown = spawn_listener(signals);
//! let total = Scheduler::new(&BlackHoleConfig::default(), display)
//!     .run(shutdown)
//!     .await?;
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`size`] | [`SizeCounter`] trait and the [`DiskUsage`] walk |
//! | [`purge`] | [`DirectoryPurger`] and the [`EntryRemover`] seam, best-effort removal of a directory's children |
//! | [`tracker`] | [`ConsumptionTracker`] and the [`StatusDisplay`] trait |
//! | [`scheduler`] | [`Scheduler`], the fixed-interval loop |
//! | [`lifecycle`] | [`TargetDirectory`] setup/teardown and [`ShutdownSignals`] |
//! | [`config`] | [`BlackHoleConfig`] defaults |

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod purge;
pub mod scheduler;
pub mod size;
pub mod tracker;

pub use config::BlackHoleConfig;
pub use error::{Error, PurgeError, TraversalError};
pub use lifecycle::{ShutdownSignals, TargetDirectory, spawn_listener};
pub use purge::{DirectoryPurger, EntryRemover, FsRemover};
pub use scheduler::Scheduler;
pub use size::{DiskUsage, SizeCounter, dir_size};
pub use tracker::{ConsumptionTracker, StatusDisplay};
