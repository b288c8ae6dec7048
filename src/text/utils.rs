//! Width-aware truncation and padding.

use unicode_segmentation::UnicodeSegmentation;

use super::ansi::{extract_ansi_code, next_ansi_or_end};
use super::width::{grapheme_width, visible_width};

/// Truncate `text` to at most `max_width` display columns, appending `marker`
/// when anything was cut. Escape sequences pass through untouched so styling
/// (and its resets) survive truncation.
pub fn truncate_to_width(text: &str, max_width: usize, marker: &str) -> String {
    if max_width == 0 {
        return String::new();
    }

    let text_width = visible_width(text);
    if text_width <= max_width {
        return text.to_string();
    }

    let marker_width = visible_width(marker);
    let target_width = max_width.saturating_sub(marker_width);

    let mut truncated = String::new();
    let mut current_width = 0;
    let mut idx = 0;
    let mut clipped = false;

    while idx < text.len() {
        if let Some(ansi) = extract_ansi_code(text, idx) {
            truncated.push_str(&ansi.code);
            idx += ansi.length;
            continue;
        }

        let text_end = next_ansi_or_end(text, idx + 1).max(idx + 1);
        let mut end = text_end;
        while !text.is_char_boundary(end) {
            end += 1;
        }

        for grapheme in text[idx..end].graphemes(true) {
            if clipped {
                continue;
            }
            let width = grapheme_width(grapheme);
            if current_width + width > target_width {
                clipped = true;
                continue;
            }
            truncated.push_str(grapheme);
            current_width += width;
        }
        idx = end;
    }

    truncated.push_str(marker);
    truncated
}

/// Right-pad `text` with spaces to `width` display columns. Text already at
/// or past the width is returned unchanged.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let text_width = visible_width(text);
    if text_width >= width {
        return text.to_string();
    }
    format!("{text}{}", " ".repeat(width - text_width))
}
