//! Corner activity indicator.
//!
//! Runs on its own thread and paints a `label frame` pair in the top-right
//! corner using save-cursor / absolute-move / restore-cursor sequences, so it
//! never disturbs the cursor position the progressive printer relies on. The
//! screen is partitioned spatially: the spinner owns the top-right cells and
//! nothing else, and main content is never painted there while it runs.
//! `stop` is synchronous: it joins the thread and blanks the region before
//! returning. Write failures are swallowed; a broken indicator just stops
//! animating.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::platform;
use crate::text::width::visible_width;
use crate::theme::Style;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const TICK: Duration = Duration::from_millis(200);
const STOP_POLL: Duration = Duration::from_millis(20);

type SharedSink = Arc<Mutex<dyn Write + Send>>;
type WidthFn = fn() -> usize;

pub struct CornerSpinner {
    stop_flag: Arc<AtomicBool>,
    painted_width: Arc<AtomicUsize>,
    sink: SharedSink,
    width_fn: WidthFn,
    thread: Option<JoinHandle<()>>,
}

impl CornerSpinner {
    /// Start the indicator on stdout.
    pub fn start(label: impl Into<String>, style: Style) -> Self {
        Self::with_sink(
            label,
            style,
            Arc::new(Mutex::new(io::stdout())),
            platform::terminal_width,
        )
    }

    pub(crate) fn with_sink(
        label: impl Into<String>,
        style: Style,
        sink: SharedSink,
        width_fn: WidthFn,
    ) -> Self {
        let label = label.into();
        let stop_flag = Arc::new(AtomicBool::new(false));
        let painted_width = Arc::new(AtomicUsize::new(0));

        let thread_stop = Arc::clone(&stop_flag);
        let thread_painted = Arc::clone(&painted_width);
        let thread_sink = Arc::clone(&sink);

        let thread = thread::Builder::new()
            .name("corner-spinner".to_string())
            .spawn(move || {
                let mut frame = 0usize;
                'animate: while !thread_stop.load(Ordering::SeqCst) {
                    let content = format!("{label} {}", FRAMES[frame % FRAMES.len()]);
                    let content_width = visible_width(&content);
                    thread_painted.store(content_width, Ordering::SeqCst);
                    draw_top_right(&thread_sink, width_fn, content_width, &style.paint(&content));
                    frame += 1;

                    let mut waited = Duration::ZERO;
                    while waited < TICK {
                        if thread_stop.load(Ordering::SeqCst) {
                            break 'animate;
                        }
                        thread::sleep(STOP_POLL);
                        waited += STOP_POLL;
                    }
                }
            })
            .ok();

        Self {
            stop_flag,
            painted_width,
            sink,
            width_fn,
            thread,
        }
    }

    /// Returns true while the animation thread is alive.
    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }

    /// Stop the animation. Blocks until the thread has exited, then blanks
    /// the painted region so no stray glyphs survive an immediate exit.
    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::SeqCst);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
            self.clear_region();
        }
    }

    fn clear_region(&self) {
        let painted = self.painted_width.load(Ordering::SeqCst);
        if painted == 0 {
            return;
        }
        draw_top_right(&self.sink, self.width_fn, painted, &" ".repeat(painted));
    }
}

impl Drop for CornerSpinner {
    fn drop(&mut self) {
        self.stop();
    }
}

fn draw_top_right(sink: &SharedSink, width_fn: WidthFn, content_width: usize, payload: &str) {
    let columns = width_fn().max(1);
    let column = columns.saturating_sub(content_width).saturating_add(1).max(1);
    if let Ok(mut out) = sink.lock() {
        let _ = write!(out, "\x1b7\x1b[1;{column}H{payload}\x1b8");
        let _ = out.flush();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::Duration;

    use super::CornerSpinner;
    use crate::theme::Style;

    fn test_width() -> usize {
        40
    }

    #[derive(Default)]
    struct SharedBuffer(Vec<u8>);

    impl std::io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn paints_with_cursor_save_and_restore() {
        let buffer = Arc::new(Mutex::new(SharedBuffer::default()));
        let mut spinner =
            CornerSpinner::with_sink("Thinking", Style::PLAIN, buffer.clone(), test_width);
        thread::sleep(Duration::from_millis(50));
        spinner.stop();

        let bytes = buffer.lock().expect("buffer lock").0.clone();
        let out = String::from_utf8_lossy(&bytes);
        assert!(out.contains("\x1b7"));
        assert!(out.contains("\x1b8"));
        assert!(out.contains("Thinking"));
        // Absolute positioning targets row 1.
        assert!(out.contains("\x1b[1;"));
    }

    #[test]
    fn stop_is_synchronous_and_blanks_the_region() {
        let buffer = Arc::new(Mutex::new(SharedBuffer::default()));
        let mut spinner =
            CornerSpinner::with_sink("Working", Style::PLAIN, buffer.clone(), test_width);
        thread::sleep(Duration::from_millis(30));
        spinner.stop();
        assert!(!spinner.is_running());

        let len_after_stop = buffer.lock().expect("buffer lock").0.len();
        thread::sleep(Duration::from_millis(60));
        let len_later = buffer.lock().expect("buffer lock").0.len();
        // No writes after stop returned.
        assert_eq!(len_after_stop, len_later);

        let bytes = buffer.lock().expect("buffer lock").0.clone();
        let out = String::from_utf8_lossy(&bytes);
        // "Working ⠋" is nine columns wide; the blanking pass writes spaces.
        assert!(out.ends_with("\x1b7\x1b[1;32H         \x1b8"));
    }

    #[test]
    fn stop_twice_is_a_no_op() {
        let buffer = Arc::new(Mutex::new(SharedBuffer::default()));
        let mut spinner = CornerSpinner::with_sink("x", Style::PLAIN, buffer, test_width);
        spinner.stop();
        spinner.stop();
    }
}
