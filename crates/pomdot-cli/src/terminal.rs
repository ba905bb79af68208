//! crossterm-backed output sink.

use crossterm::{
    cursor, queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

use pomdot_core::OutputSink;

/// Writes to a terminal, redrawing the live line in place.
///
/// The cursor is hidden for the lifetime of the sink and shown again on drop.
pub struct TerminalSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(mut out: W) -> io::Result<Self> {
        queue!(out, cursor::Hide)?;
        out.flush()?;
        Ok(Self { out })
    }
}

impl<W: Write> OutputSink for TerminalSink<W> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        queue!(self.out, Print(line), Print("\n"))?;
        self.out.flush()
    }

    fn update_line(&mut self, line: &str) -> io::Result<()> {
        queue!(self.out, Print("\r"), Clear(ClearType::CurrentLine), Print(line))?;
        self.out.flush()
    }

    fn finish_line(&mut self) -> io::Result<()> {
        queue!(self.out, Print("\n"))?;
        self.out.flush()
    }

    fn bell(&mut self) -> io::Result<()> {
        queue!(self.out, Print("\x07"))?;
        self.out.flush()
    }
}

impl<W: Write> Drop for TerminalSink<W> {
    fn drop(&mut self) {
        if let Err(e) = queue!(self.out, cursor::Show).and_then(|()| self.out.flush()) {
            tracing::warn!(error = %e, "failed to restore cursor");
        }
    }
}
