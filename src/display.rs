//! Progressive in-place rendering of a growing response.
//!
//! The printer re-renders the whole accumulated buffer on each repaint and
//! replaces the previous frame wholesale: erase exactly the previously
//! printed line count, then print the new rendering. Diffing would not help
//! because a trailing open code fence can retroactively change earlier output
//! once it closes.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::markdown::MarkdownRenderer;

/// Default minimum interval between repaints for newline-free deltas.
///
/// Newline-bearing deltas repaint immediately so line boundaries feel
/// responsive; everything else is throttled to bound full re-renders of the
/// growing buffer.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(80);

pub struct StreamingPrinter<W: Write> {
    out: W,
    renderer: MarkdownRenderer,
    buffer: String,
    painted_lines: usize,
    last_paint: Option<Instant>,
    throttle: Duration,
}

impl<W: Write> StreamingPrinter<W> {
    pub fn new(out: W, renderer: MarkdownRenderer) -> Self {
        Self {
            out,
            renderer,
            buffer: String::new(),
            painted_lines: 0,
            last_paint: None,
            throttle: DEFAULT_THROTTLE,
        }
    }

    /// Override the repaint throttle. `Duration::ZERO` repaints on every
    /// delta.
    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    /// Raw text accumulated so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Returns true once at least one frame has been painted.
    pub fn has_painted(&self) -> bool {
        self.last_paint.is_some()
    }

    /// Append one delta and repaint when a line boundary arrived or the
    /// throttle interval has elapsed.
    pub fn on_delta(&mut self, delta: &str) -> io::Result<()> {
        self.buffer.push_str(delta);
        let throttle_elapsed = self
            .last_paint
            .map_or(true, |at| at.elapsed() >= self.throttle);
        if delta.contains('\n') || throttle_elapsed {
            self.repaint()?;
        }
        Ok(())
    }

    /// Erase the previous frame and print the current rendering of the
    /// buffer. The erase distance is always the *previous* frame's printed
    /// line count, independent of the new frame's size.
    pub fn repaint(&mut self) -> io::Result<()> {
        let frame = self.renderer.render(&self.buffer);
        let lines = frame.matches('\n').count();

        if self.has_painted() {
            if self.painted_lines > 0 {
                write!(self.out, "\x1b[{}A", self.painted_lines)?;
            }
            write!(self.out, "\r\x1b[J")?;
        }

        self.out.write_all(frame.as_bytes())?;
        self.out.flush()?;

        self.painted_lines = lines;
        self.last_paint = Some(Instant::now());
        Ok(())
    }

    /// Replace the buffered document wholesale, e.g. with the finalized,
    /// fence-balanced text after the stream ends.
    pub fn replace_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// Force a final repaint and terminate the frame with a newline.
    pub fn flush(&mut self) -> io::Result<()> {
        self.repaint()?;
        writeln!(self.out)?;
        self.out.flush()
    }

    /// Keep the painted frame and append a styled error notice below it.
    pub fn append_error_notice(&mut self, detail: &str) -> io::Result<()> {
        let notice = self
            .renderer
            .theme()
            .error
            .paint(&format!("✖ stream interrupted: {detail}"));
        writeln!(self.out)?;
        writeln!(self.out, "{notice}")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
