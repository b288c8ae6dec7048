//! Session driver: wires the streaming client to the progressive printer.
//!
//! One ask cycle runs the corner spinner while the request is in flight,
//! stops and blanks it on the first content delta (before the first repaint,
//! since both sides assume exclusive cursor addressing when they write), then
//! feeds every delta to the printer. After a clean `Done` the finalized,
//! fence-balanced text replaces the buffer for one last repaint. A mid-stream
//! read failure keeps whatever is painted and appends an error notice; a
//! cancellation discards the partial answer entirely.

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use chat_api::{ChatApiClient, ChatApiError, ChatRequest, ChatStreamEvent, ResponseAccumulator};
use streamdown::{CornerSpinner, EnvConfig, MarkdownRenderer, StreamingPrinter, Theme, DEFAULT_THROTTLE};

/// Shared cancellation flag, typically wired to SIGINT.
pub type CancelSignal = Arc<AtomicBool>;

/// Creates an un-tripped cancellation signal.
pub fn cancel_signal() -> CancelSignal {
    Arc::new(AtomicBool::new(false))
}

/// The completed answer: the normalized raw text for downstream reuse, and
/// its rendering as shown on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub raw: String,
    pub rendered: String,
}

#[derive(Debug)]
pub enum SessionError {
    Api(ChatApiError),
    Io(io::Error),
    Cancelled,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(error) => write!(f, "{error}"),
            Self::Io(error) => write!(f, "terminal write failed: {error}"),
            Self::Cancelled => write!(f, "interrupted"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<ChatApiError> for SessionError {
    fn from(error: ChatApiError) -> Self {
        match error {
            ChatApiError::Cancelled => Self::Cancelled,
            other => Self::Api(other),
        }
    }
}

impl From<io::Error> for SessionError {
    fn from(error: io::Error) -> Self {
        Self::Io(error)
    }
}

#[derive(Debug, Clone)]
pub struct AskOptions {
    pub theme: Theme,
    pub throttle: Duration,
    pub spinner_label: String,
    /// Disable the corner spinner, e.g. when stdout is not a terminal.
    pub show_spinner: bool,
}

impl Default for AskOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default_colors(),
            throttle: DEFAULT_THROTTLE,
            spinner_label: "Thinking".to_string(),
            show_spinner: true,
        }
    }
}

/// Derive ask options from environment configuration and TTY state.
pub fn options_from_env(config: &EnvConfig, is_tty: bool) -> AskOptions {
    let mut options = AskOptions::default();
    if config.no_color || !is_tty {
        options.theme = Theme::plain();
    }
    if let Some(throttle) = config.throttle {
        options.throttle = throttle;
    }
    options.show_spinner = is_tty;
    options
}

/// Run one ask cycle against `client`, painting progressively into `out`.
/// The question arrives with any file context already merged in.
pub async fn ask<W: Write>(
    client: &ChatApiClient,
    question: &str,
    out: W,
    options: AskOptions,
    cancel: CancelSignal,
) -> Result<Answer, SessionError> {
    let renderer = MarkdownRenderer::new(options.theme.clone());
    let mut printer =
        StreamingPrinter::new(out, renderer.clone()).with_throttle(options.throttle);
    let mut accumulator = ResponseAccumulator::new();
    let mut spinner = options
        .show_spinner
        .then(|| CornerSpinner::start(options.spinner_label.clone(), options.theme.spinner));
    let mut io_error: Option<io::Error> = None;

    let request = ChatRequest::chat(client.config().model.clone(), question);
    let result = client
        .stream_with_handler(&request, Some(&cancel), |event| match event {
            ChatStreamEvent::Content { delta } => {
                if let Some(mut spinner) = spinner.take() {
                    spinner.stop();
                }
                accumulator.append(&delta);
                if io_error.is_none() {
                    if let Err(error) = printer.on_delta(&delta) {
                        io_error = Some(error);
                    }
                }
            }
            ChatStreamEvent::Done => {}
            ChatStreamEvent::Error { detail } => {
                if printer.has_painted() {
                    let _ = printer.append_error_notice(&detail);
                }
            }
        })
        .await;

    if let Some(mut spinner) = spinner.take() {
        spinner.stop();
    }
    if let Some(error) = io_error {
        return Err(SessionError::Io(error));
    }

    result?;

    let raw = accumulator.finalize();
    printer.replace_buffer(raw.clone());
    printer.flush()?;

    let rendered = renderer.render(&raw);
    Ok(Answer { raw, rendered })
}
