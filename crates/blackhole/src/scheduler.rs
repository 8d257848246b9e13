//! The fixed-interval purge loop.

use std::time::Duration;

use futures::FutureExt;
use tokio::time::{Instant, interval_at};
use tracing::{debug, info, trace};

use crate::config::BlackHoleConfig;
use crate::error::Error;
use crate::lifecycle::TargetDirectory;
use crate::purge::DirectoryPurger;
use crate::size::{DiskUsage, SizeCounter};
use crate::tracker::{ConsumptionTracker, StatusDisplay};

/// Drives one purge cycle per tick until shutdown is requested.
///
/// Ticks are not compensated: if a cycle overruns the interval, the missed
/// ticks fire back to back afterwards. Any purge failure ends the loop,
/// unless shutdown was requested while that cycle ran.
pub struct Scheduler<D, C = DiskUsage> {
    target: TargetDirectory,
    purger: DirectoryPurger<C>,
    tracker: ConsumptionTracker<D>,
    interval: Duration,
}

impl<D: StatusDisplay> Scheduler<D> {
    pub fn new(config: &BlackHoleConfig, display: D) -> Self {
        Self {
            target: TargetDirectory::new(&config.target_dir),
            purger: DirectoryPurger::new(&config.target_dir),
            tracker: ConsumptionTracker::new(display),
            interval: config.interval,
        }
    }
}

impl<D: StatusDisplay, C: SizeCounter> Scheduler<D, C> {
    /// Measure the target directory with `counter` instead of [`DiskUsage`].
    pub fn with_counter<N: SizeCounter>(self, counter: N) -> Scheduler<D, N> {
        Scheduler {
            target: self.target,
            purger: self.purger.with_counter(counter),
            tracker: self.tracker,
            interval: self.interval,
        }
    }

    pub fn tracker(&self) -> &ConsumptionTracker<D> {
        &self.tracker
    }

    /// Run until `shutdown` resolves or a purge cycle fails.
    ///
    /// The target directory is created before the first tick and removed
    /// when `shutdown` resolves. Returns the final consumption total in
    /// bytes.
    pub async fn run<F: Future>(mut self, shutdown: F) -> Result<i64, Error> {
        self.target.ensure()?;

        // tokio panics on a zero period.
        let period = self.interval.max(Duration::from_millis(1));
        let mut ticker = interval_at(Instant::now() + period, period);
        tokio::pin!(shutdown);

        info!(
            dir = %self.target.path().display(),
            ?period,
            "black hole open"
        );

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => return Ok(self.close()),
                _ = ticker.tick() => {}
            }

            match self.purger.purge(&mut self.tracker) {
                Ok(eaten) => trace!(eaten, total = self.tracker.total(), "purge cycle"),
                // A termination request that landed mid-cycle wins over the failure.
                Err(e) if shutdown.as_mut().now_or_never().is_some() => {
                    debug!(error = %e, "purge failed during shutdown");
                    return Ok(self.close());
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn close(&self) -> i64 {
        self.target.remove();
        let total = self.tracker.total();
        info!(total, "black hole closed");
        total
    }
}
