//! Styling configuration for rendered output.
//!
//! A [`Theme`] is an immutable table of SGR styles injected into the renderer
//! at construction, so `render` stays a pure function of its input text.

/// One SGR style, applied by wrapping text in escape sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    sgr: &'static str,
}

impl Style {
    pub const fn new(sgr: &'static str) -> Self {
        Self { sgr }
    }

    /// The identity style: `paint` returns its input unchanged.
    pub const PLAIN: Style = Style::new("");

    pub fn paint(&self, text: &str) -> String {
        if self.sgr.is_empty() {
            return text.to_string();
        }
        format!("\x1b[{}m{text}\x1b[0m", self.sgr)
    }

    pub fn is_plain(&self) -> bool {
        self.sgr.is_empty()
    }
}

/// Color theme for markdown output and the surrounding chrome.
#[derive(Debug, Clone)]
pub struct Theme {
    pub heading1: Style,
    pub heading2: Style,
    pub heading3: Style,
    pub heading_other: Style,
    pub bold: Style,
    pub italic: Style,
    pub inline_code: Style,
    pub box_border: Style,
    pub error: Style,
    pub spinner: Style,
}

impl Theme {
    pub fn default_colors() -> Self {
        Self {
            heading1: Style::new("1;31"),
            heading2: Style::new("1;33"),
            heading3: Style::new("1;32"),
            heading_other: Style::new("1;36"),
            bold: Style::new("1"),
            italic: Style::new("3"),
            inline_code: Style::new("100;37"),
            box_border: Style::new("90"),
            error: Style::new("1;31"),
            spinner: Style::new("36"),
        }
    }

    /// All-identity theme, for tests and `NO_COLOR` terminals.
    pub fn plain() -> Self {
        Self {
            heading1: Style::PLAIN,
            heading2: Style::PLAIN,
            heading3: Style::PLAIN,
            heading_other: Style::PLAIN,
            bold: Style::PLAIN,
            italic: Style::PLAIN,
            inline_code: Style::PLAIN,
            box_border: Style::PLAIN,
            error: Style::PLAIN,
            spinner: Style::PLAIN,
        }
    }

    /// Heading style for a `#`-level, 1-based. Levels past 3 share one style.
    pub fn heading(&self, level: usize) -> Style {
        match level {
            1 => self.heading1,
            2 => self.heading2,
            3 => self.heading3,
            _ => self.heading_other,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_colors()
    }
}
