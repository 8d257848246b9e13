//! Ways to clear a terminal screen.

use std::io::{self, Write};
use std::process::{Command, Stdio};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use tracing::debug;

/// One strategy for wiping the screen before the status line is redrawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenClearer {
    /// Write the ANSI clear-screen and cursor-home sequences to the output.
    Ansi,
    /// Run an external program (`clear`, `cls`) attached to the process's
    /// own stdout.
    Command { program: String, args: Vec<String> },
}

impl ScreenClearer {
    pub fn command<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Command {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Clear the screen that `out` is drawing to.
    ///
    /// For [`ScreenClearer::Command`] the program writes to the real stdout,
    /// so `out` is flushed first to keep the two in order.
    pub fn clear(&self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Self::Ansi => queue!(out, Clear(ClearType::All), MoveTo(0, 0)),
            Self::Command { program, args } => {
                out.flush()?;
                let status = Command::new(program)
                    .args(args)
                    .stdout(Stdio::inherit())
                    .status()
                    .inspect_err(|e| {
                        debug!(program = %program, error = %e, "could not run clear command")
                    })?;
                if status.success() {
                    Ok(())
                } else {
                    debug!(program = %program, %status, "clear command failed");
                    Err(io::Error::other(format!("{program} exited with {status}")))
                }
            }
        }
    }
}
