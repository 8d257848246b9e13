//! Terminal implementation of [`StatusDisplay`].

use std::io::{self, Write};

use blackhole::StatusDisplay;

use crate::clear::ScreenClearer;

/// A terminal that shows one status line at a time.
///
/// Every [`show`](StatusDisplay::show) clears the screen and writes the line
/// without a trailing newline, so the cursor stays at the end of the text.
pub struct Screen<W> {
    clearer: ScreenClearer,
    out: W,
}

impl Screen<io::Stdout> {
    pub fn stdout(clearer: ScreenClearer) -> Self {
        Self::new(clearer, io::stdout())
    }
}

impl<W: Write> Screen<W> {
    pub fn new(clearer: ScreenClearer, out: W) -> Self {
        Self { clearer, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StatusDisplay for Screen<W> {
    fn show(&mut self, line: &str) -> io::Result<()> {
        self.clearer.clear(&mut self.out)?;
        self.out.write_all(line.as_bytes())?;
        self.out.flush()
    }
}
