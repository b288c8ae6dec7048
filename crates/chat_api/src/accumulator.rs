const FENCE: &str = "```";
const MAX_CONSECUTIVE_NEWLINES: usize = 3;

/// Accumulates streamed text deltas and produces the normalized final text.
///
/// `append` is pure concatenation; all cleanup happens in [`finalize`], so the
/// raw buffer stays byte-identical to what the stream delivered.
///
/// [`finalize`]: ResponseAccumulator::finalize
#[derive(Debug, Default)]
pub struct ResponseAccumulator {
    buffer: String,
}

impl ResponseAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one delta, in arrival order.
    pub fn append(&mut self, delta: &str) {
        self.buffer.push_str(delta);
    }

    /// Returns the raw accumulated text so far.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consume the accumulator and return the cleaned response: line endings
    /// normalized to `\n`, outer whitespace trimmed, an unmatched trailing
    /// code fence closed, and runs of blank lines capped.
    pub fn finalize(self) -> String {
        finalize_response(&self.buffer)
    }
}

/// Normalization applied once, after the stream has ended. Idempotent.
pub fn finalize_response(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut normalized = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\r' {
            if chars.peek() == Some(&'\n') {
                continue;
            }
            normalized.push('\n');
        } else {
            normalized.push(ch);
        }
    }

    let mut cleaned = normalized.trim().to_string();
    if cleaned.matches(FENCE).count() % 2 == 1 {
        cleaned.push_str("\n```");
    }

    limit_newlines(&cleaned, MAX_CONSECUTIVE_NEWLINES)
}

fn limit_newlines(text: &str, max_run: usize) -> String {
    let mut result = String::with_capacity(text.len());
    let mut run = 0usize;
    for ch in text.chars() {
        if ch == '\n' {
            run += 1;
            if run <= max_run {
                result.push(ch);
            }
        } else {
            run = 0;
            result.push(ch);
        }
    }
    result
}
