//! Grapheme and visible display-width helpers.
//!
//! Width policy: grapheme clusters are measured with `unicode-width` per
//! scalar, RGI emoji count as 2 columns, tabs expand to a fixed 4-column
//! stop, and escape sequences contribute nothing.

use emojis::get as emoji_get;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use super::ansi::extract_ansi_code;

/// Fixed tab stop used for both measurement and code-block normalization.
pub const TAB_STOP: usize = 4;

pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_empty() {
        return 0;
    }
    if grapheme == "\t" {
        return TAB_STOP;
    }

    if emoji_get(grapheme).is_some() {
        return 2;
    }

    let mut width = 0;
    for ch in grapheme.chars() {
        if ch == '\t' {
            width += TAB_STOP;
            continue;
        }
        width += UnicodeWidthChar::width(ch).unwrap_or(0);
    }
    width
}

/// Display width of `input`, ignoring ANSI escape sequences.
pub fn visible_width(input: &str) -> usize {
    if input.is_empty() {
        return 0;
    }

    let mut clean = String::with_capacity(input.len());
    let mut idx = 0;
    while idx < input.len() {
        if let Some(ansi) = extract_ansi_code(input, idx) {
            idx += ansi.length;
            continue;
        }

        let Some(ch) = input[idx..].chars().next() else {
            break;
        };
        if ch == '\t' {
            for _ in 0..TAB_STOP {
                clean.push(' ');
            }
        } else {
            clean.push(ch);
        }
        idx += ch.len_utf8();
    }

    let mut width = 0;
    for grapheme in clean.graphemes(true) {
        width += grapheme_width(grapheme);
    }
    width
}

/// Replace tabs with spaces at the fixed stop.
pub fn expand_tabs(input: &str) -> String {
    if !input.contains('\t') {
        return input.to_string();
    }
    input.replace('\t', &" ".repeat(TAB_STOP))
}
