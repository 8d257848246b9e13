//! Black hole: a directory that eats whatever you put in it.
//!
//! Creates `hole` in the working directory and empties it every 500ms,
//! printing how much it has eaten so far. Takes no arguments. Stop it with
//! any termination signal (Ctrl+C, `kill`, closing the terminal); the
//! directory is removed on the way out.
//!
//! # Examples
//!
//! ```sh
//! blackhole
//!
//! # Diagnostics on stderr
//! BLACKHOLE_LOG=debug blackhole 2>blackhole.log
//! ```

use blackhole::{BlackHoleConfig, Scheduler, ShutdownSignals, spawn_listener};
use blackhole_term::{ClearRegistry, Screen};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the tracing filter directives.
const LOG_ENV: &str = "BLACKHOLE_LOG";

#[tokio::main]
async fn main() {
    init_tracing();

    let clearer = match ClearRegistry::default().for_current_platform() {
        Ok(c) => c,
        Err(e) => fail(e),
    };

    // Listeners go in before the directory exists, so a signal can never
    // hit the default handler and leave `hole` behind.
    let signals = match ShutdownSignals::register() {
        Ok(s) => s,
        Err(e) => fail(e),
    };
    let shutdown = spawn_listener(signals);

    let config = BlackHoleConfig::default();
    match Scheduler::new(&config, Screen::stdout(clearer))
        .run(shutdown)
        .await
    {
        Ok(total) => info!(total, "exiting"),
        Err(e) => fail(e),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn fail(e: impl std::fmt::Display) -> ! {
    // The status line has no trailing newline.
    eprintln!();
    eprintln!("Error: {e}");
    std::process::exit(1);
}
