//! Markdown-to-ANSI rendering for partial, still-streaming documents.
//!
//! `render` is safe to call repeatedly on a growing prefix of the same
//! document: closed code fences become bordered, syntax-highlighted boxes; a
//! trailing unclosed fence is rendered as a box too once its language line is
//! complete, so code appears highlighted while it streams. Inline styling
//! runs over placeholder-substituted text so box interiors are never
//! re-scanned for emphasis markers.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::highlight;
use crate::text::ansi::strip_ansi;
use crate::text::utils::{pad_to_width, truncate_to_width};
use crate::text::width::{expand_tabs, visible_width};
use crate::theme::Theme;

const FENCE: &str = "```";
const PLACEHOLDER_MARK: char = '\u{0}';
const TRUNCATION_MARKER: &str = "…";

/// Interior width bounds for code boxes, in display columns.
pub const BOX_MIN_WIDTH: usize = 50;
pub const BOX_MAX_WIDTH: usize = 100;

fn fence_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(r"```([a-zA-Z0-9_+-]*)\n([\s\S]*?)\n?```").expect("fence regex must compile")
    })
}

fn bold_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(r"\*\*([^*]+)\*\*|__([^_]+)__").expect("bold regex must compile")
    })
}

fn italic_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED
        .get_or_init(|| Regex::new(r"\*([^*]+)\*|_([^_]+)_").expect("italic regex must compile"))
}

fn inline_code_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| Regex::new(r"`([^`]+)`").expect("inline code regex must compile"))
}

fn header_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("header regex must compile"))
}

/// Renders markdown text to ANSI-styled terminal output.
///
/// Pure function of its input and the injected theme; identical input always
/// produces identical bytes.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    theme: Theme,
    min_box_width: usize,
    max_box_width: usize,
}

impl MarkdownRenderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            min_box_width: BOX_MIN_WIDTH,
            max_box_width: BOX_MAX_WIDTH,
        }
    }

    /// Override the code-box interior width clamp.
    pub fn with_box_widths(mut self, min: usize, max: usize) -> Self {
        self.min_box_width = min.min(max);
        self.max_box_width = max.max(min);
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Render a possibly incomplete markdown document.
    pub fn render(&self, text: &str) -> String {
        let mut boxes: Vec<String> = Vec::new();
        let text = self.extract_closed_blocks(text, &mut boxes);
        let text = self.extract_open_block(&text, &mut boxes);
        let text = self.apply_inline_styles(&text);
        restore_blocks(&text, &boxes)
    }

    fn extract_closed_blocks(&self, text: &str, boxes: &mut Vec<String>) -> String {
        fence_regex()
            .replace_all(text, |caps: &Captures<'_>| {
                let language = caps.get(1).map_or("", |m| m.as_str());
                let body = caps.get(2).map_or("", |m| m.as_str());
                stash_block(self.format_code_block(body, language), boxes)
            })
            .into_owned()
    }

    /// Handle a trailing block whose closing fence hasn't arrived yet. The
    /// block starts at the last remaining fence marker; until a newline
    /// terminates its language line it stays literal text.
    fn extract_open_block(&self, text: &str, boxes: &mut Vec<String>) -> String {
        if text.matches(FENCE).count() % 2 == 0 {
            return text.to_string();
        }
        let Some(idx) = text.rfind(FENCE) else {
            return text.to_string();
        };

        let rest = &text[idx + FENCE.len()..];
        let Some(newline) = rest.find('\n') else {
            return text.to_string();
        };

        let language = rest[..newline].trim();
        let body = &rest[newline + 1..];
        let token = stash_block(self.format_code_block(body, language), boxes);
        format!("{}{}", &text[..idx], token)
    }

    fn apply_inline_styles(&self, text: &str) -> String {
        let text = bold_regex().replace_all(text, |caps: &Captures<'_>| {
            let inner = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            self.theme.bold.paint(inner)
        });
        let text = italic_regex().replace_all(&text, |caps: &Captures<'_>| {
            let inner = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            self.theme.italic.paint(inner)
        });
        let text = inline_code_regex().replace_all(&text, |caps: &Captures<'_>| {
            self.theme.inline_code.paint(&format!(" {} ", &caps[1]))
        });
        self.style_headers(&text)
    }

    fn style_headers(&self, text: &str) -> String {
        let mut styled = Vec::new();
        for line in text.split('\n') {
            match header_regex().captures(line) {
                Some(caps) => {
                    let level = caps[1].len();
                    styled.push(self.theme.heading(level).paint(&caps[2]));
                }
                None => styled.push(line.to_string()),
            }
        }
        styled.join("\n")
    }

    /// Highlight and box one code block. An all-whitespace body renders as
    /// nothing at all rather than an empty frame.
    fn format_code_block(&self, code: &str, language: &str) -> String {
        let code = expand_tabs(code);
        let mut lines: Vec<String> = if language.is_empty() {
            code.split('\n').map(str::to_string).collect()
        } else {
            highlight::highlight_lines(&code, language)
        };

        while lines
            .last()
            .is_some_and(|line| strip_ansi(line).trim().is_empty())
        {
            lines.pop();
        }
        if lines.is_empty() {
            return String::new();
        }

        let widest = lines.iter().map(|line| visible_width(line)).max().unwrap_or(0);
        let interior = widest.clamp(self.min_box_width, self.max_box_width);
        // Content rows carry one space of padding on each side.
        let inner = interior + 2;
        let border = &self.theme.box_border;

        let mut rendered = Vec::with_capacity(lines.len() + 2);
        rendered.push(border.paint(&top_border(language, inner)));

        for line in &lines {
            let fitted = if visible_width(line) > interior {
                truncate_to_width(line, interior, TRUNCATION_MARKER)
            } else {
                line.clone()
            };
            rendered.push(format!(
                "{} {} {}",
                border.paint("│"),
                pad_to_width(&fitted, interior),
                border.paint("│")
            ));
        }

        rendered.push(border.paint(&format!("╰{}╯", "─".repeat(inner))));

        let mut out = rendered.join("\n");
        out.push('\n');
        out
    }
}

fn top_border(language: &str, inner: usize) -> String {
    if language.is_empty() {
        return format!("╭{}╮", "─".repeat(inner));
    }
    let mut head = format!("─ {language} ");
    if visible_width(&head) > inner {
        head = truncate_to_width(&head, inner, TRUNCATION_MARKER);
    }
    let fill = inner.saturating_sub(visible_width(&head));
    format!("╭{head}{}╮", "─".repeat(fill))
}

fn stash_block(rendered: String, boxes: &mut Vec<String>) -> String {
    let token = format!("{PLACEHOLDER_MARK}{}{PLACEHOLDER_MARK}", boxes.len());
    boxes.push(rendered);
    token
}

fn restore_blocks(text: &str, boxes: &[String]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(PLACEHOLDER_MARK) {
        out.push_str(&rest[..start]);
        let after = &rest[start + PLACEHOLDER_MARK.len_utf8()..];
        let Some(end) = after.find(PLACEHOLDER_MARK) else {
            out.push_str(&rest[start..]);
            return out;
        };

        match after[..end].parse::<usize>().ok().and_then(|idx| boxes.get(idx)) {
            Some(block) => out.push_str(block),
            // Not one of ours; emit the bytes untouched.
            None => out.push_str(&rest[start..start + end + 2 * PLACEHOLDER_MARK.len_utf8()]),
        }
        rest = &after[end + PLACEHOLDER_MARK.len_utf8()..];
    }

    out.push_str(rest);
    out
}
