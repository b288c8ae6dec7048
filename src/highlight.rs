//! Language-aware code highlighting.
//!
//! Built on syntect's bundled syntax and theme sets, loaded lazily. Unknown
//! language tags and per-line highlight failures degrade to plain text and
//! never surface as errors.

use once_cell::sync::Lazy;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::as_24_bit_terminal_escaped;

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_nonewlines);
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

const HIGHLIGHT_THEME: &str = "base16-ocean.dark";
const RESET: &str = "\x1b[0m";

/// Force the lazy syntax and theme sets to load. Call from a background
/// thread at startup so the first code block doesn't stall a repaint.
pub fn prewarm() {
    Lazy::force(&SYNTAX_SET);
    Lazy::force(&THEME_SET);
}

/// Highlight `code` line by line into ANSI-styled strings. Each returned line
/// ends with a style reset so later padding is unaffected.
pub fn highlight_lines(code: &str, language: &str) -> Vec<String> {
    let syntax = lookup_syntax(language);
    let Some(theme) = THEME_SET.themes.get(HIGHLIGHT_THEME) else {
        return code.split('\n').map(str::to_string).collect();
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    code.split('\n')
        .map(|line| match highlighter.highlight_line(line, &SYNTAX_SET) {
            Ok(ranges) => {
                let mut styled = as_24_bit_terminal_escaped(&ranges, false);
                styled.push_str(RESET);
                styled
            }
            Err(_) => line.to_string(),
        })
        .collect()
}

fn lookup_syntax(language: &str) -> &'static SyntaxReference {
    let token = language.trim();
    if token.is_empty() {
        return SYNTAX_SET.find_syntax_plain_text();
    }
    SYNTAX_SET
        .find_syntax_by_token(token)
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text())
}
