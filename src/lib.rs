//! Progressive markdown rendering for streaming terminal output.
//!
//! Invariant: the progressive printer owns the cursor. Rendered markdown
//! contains SGR styling only, never cursor movement, so erase/repaint math in
//! [`StreamingPrinter`] stays correct.
//!
//! # Public API Overview
//! - Render partial markdown with [`MarkdownRenderer`]; code fences become
//!   syntax-highlighted boxes even before they close.
//! - Drive in-place repainting of a growing buffer with [`StreamingPrinter`].
//! - Show background activity with [`CornerSpinner`], confined to the
//!   top-right corner of the screen.
//! - Use the ANSI-aware width helpers for any custom layout math.

pub mod config;
pub mod display;
pub mod highlight;
pub mod markdown;
pub mod platform;
pub mod spinner;
pub mod text;
pub mod theme;

pub use crate::config::EnvConfig;
pub use crate::display::{StreamingPrinter, DEFAULT_THROTTLE};
pub use crate::highlight::{highlight_lines, prewarm as prewarm_highlighting};
pub use crate::markdown::{MarkdownRenderer, BOX_MAX_WIDTH, BOX_MIN_WIDTH};
pub use crate::spinner::CornerSpinner;
pub use crate::text::ansi::strip_ansi;
pub use crate::text::utils::{pad_to_width, truncate_to_width};
pub use crate::text::width::visible_width;
pub use crate::theme::{Style, Theme};
