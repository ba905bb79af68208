//! Turns engine events into terminal lines.
//!
//! The renderer knows the layout; the [`OutputSink`] knows how to put a line
//! on screen. Compact mode prints only the live countdown line for each
//! stage, full mode adds a short header with the stage label and its
//! wall-clock start and end.

use chrono::{DateTime, Local, TimeDelta};
use std::io;

use crate::duration::format_hhmmss;
use crate::error::RenderError;
use crate::events::Event;
use crate::timer::{render_bar, Stage};

pub const APP_NAME: &str = "Pomdot";

/// A line-oriented output target with an in-place "live" line.
pub trait OutputSink {
    /// Print a complete line.
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Replace the contents of the current (unterminated) line.
    fn update_line(&mut self, line: &str) -> io::Result<()>;

    /// Terminate the current live line.
    fn finish_line(&mut self) -> io::Result<()>;

    /// Ring the terminal bell.
    fn bell(&mut self) -> io::Result<()>;
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }

    fn update_line(&mut self, line: &str) -> io::Result<()> {
        (**self).update_line(line)
    }

    fn finish_line(&mut self) -> io::Result<()> {
        (**self).finish_line()
    }

    fn bell(&mut self) -> io::Result<()> {
        (**self).bell()
    }
}

pub struct Renderer<S> {
    sink: S,
    compact: bool,
    bar_width: u16,
}

impl<S: OutputSink> Renderer<S> {
    pub fn new(sink: S, compact: bool, bar_width: u16) -> Self {
        Self {
            sink,
            compact,
            bar_width,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// `Pomdot v1.0.0`
    pub fn banner(&mut self) -> Result<(), RenderError> {
        self.sink
            .write_line(&format!("{APP_NAME} v{}", env!("CARGO_PKG_VERSION")))?;
        Ok(())
    }

    pub fn handle(&mut self, event: &Event) -> Result<(), RenderError> {
        match *event {
            Event::StageStarted { stage } => {
                self.sink.write_line("")?;
                if !self.compact {
                    self.stage_header(&stage, Local::now())?;
                }
                self.sink
                    .update_line(&live_line(&stage, stage.duration_secs, self.bar_width))?;
            }
            Event::Tick {
                stage,
                remaining_secs,
                ..
            } => {
                self.sink
                    .update_line(&live_line(&stage, remaining_secs, self.bar_width))?;
            }
            Event::StageFinished { .. } => self.sink.finish_line()?,
            Event::Alert { .. } => self.sink.bell()?,
            Event::RunCompleted => {
                self.sink.write_line("")?;
                self.sink.write_line("Done!")?;
            }
            Event::RunCancelled { .. } => {
                self.sink.finish_line()?;
                self.sink.write_line("Cancelled.")?;
            }
        }
        Ok(())
    }

    fn stage_header(&mut self, stage: &Stage, start: DateTime<Local>) -> io::Result<()> {
        let end = i64::try_from(stage.duration_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|d| start.checked_add_signed(d));
        let end = match end {
            Some(end) => end.format("%H:%M:%S").to_string(),
            None => "--:--:--".to_string(),
        };
        self.sink
            .write_line(&format!("Stage:     {}", stage.label()))?;
        self.sink
            .write_line(&format!("Start:     {}", start.format("%H:%M:%S")))?;
        self.sink.write_line(&format!("End:       {end}"))
    }
}

/// `Stage: Focus 1/2 | Remaining: 00:24:59 [#-----------------------------]`
pub fn live_line(stage: &Stage, remaining_secs: u64, bar_width: u16) -> String {
    let elapsed = stage.duration_secs.saturating_sub(remaining_secs);
    format!(
        "Stage: {} | Remaining: {} {}",
        stage.label(),
        format_hhmmss(remaining_secs),
        render_bar(elapsed, stage.duration_secs, bar_width)
    )
}

/// One call made on a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOp {
    Line(String),
    Update(String),
    Finish,
    Bell,
}

/// In-memory sink for tests.
///
/// Can be told to start failing after a number of calls, to exercise the
/// render error path.
#[derive(Debug, Default)]
pub struct RecordingSink {
    ops: Vec<SinkOp>,
    fail_after: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `calls` calls, then report a broken pipe on every call after.
    pub fn failing_after(calls: usize) -> Self {
        Self {
            ops: Vec::new(),
            fail_after: Some(calls),
        }
    }

    pub fn ops(&self) -> &[SinkOp] {
        &self.ops
    }

    /// Lines as they would finally appear on screen, live lines included.
    pub fn screen(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut live: Option<String> = None;
        for op in &self.ops {
            match op {
                SinkOp::Line(line) => {
                    if let Some(live) = live.take() {
                        lines.push(live);
                    }
                    lines.push(line.clone());
                }
                SinkOp::Update(line) => live = Some(line.clone()),
                SinkOp::Finish => lines.extend(live.take()),
                SinkOp::Bell => {}
            }
        }
        lines.extend(live);
        lines
    }

    pub fn bells(&self) -> usize {
        self.ops.iter().filter(|op| **op == SinkOp::Bell).count()
    }

    fn record(&mut self, op: SinkOp) -> io::Result<()> {
        if self.fail_after.is_some_and(|n| self.ops.len() >= n) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        self.ops.push(op);
        Ok(())
    }
}

impl OutputSink for RecordingSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.record(SinkOp::Line(line.to_string()))
    }

    fn update_line(&mut self, line: &str) -> io::Result<()> {
        self.record(SinkOp::Update(line.to_string()))
    }

    fn finish_line(&mut self) -> io::Result<()> {
        self.record(SinkOp::Finish)
    }

    fn bell(&mut self) -> io::Result<()> {
        self.record(SinkOp::Bell)
    }
}
