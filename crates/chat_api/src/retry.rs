use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

/// Maximum retry attempts after an initial request attempt.
pub const MAX_RETRIES: u32 = 3;
/// Base delay before the first retry.
pub const BASE_DELAY_MS: u64 = 500;

fn transient_error_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(r"(?i)rate.?limit|overloaded|service.?unavailable|upstream.?connect|connection.?refused|timed?.?out")
            .expect("retry regex must compile")
    })
}

/// Retry policy for failures observed before any stream bytes flow.
pub fn is_retryable_http_error(status: u16, error_text: &str) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504) || transient_error_regex().is_match(error_text)
}

/// Compute exponential backoff delay for a retry attempt.
pub fn retry_delay(attempt: u32) -> Duration {
    let exponent = attempt.min(30);
    Duration::from_millis(BASE_DELAY_MS * 2u64.saturating_pow(exponent))
}

#[cfg(test)]
mod tests {
    use super::{is_retryable_http_error, retry_delay, BASE_DELAY_MS};

    #[test]
    fn retryable_statuses_and_messages() {
        assert!(is_retryable_http_error(429, ""));
        assert!(is_retryable_http_error(503, ""));
        assert!(is_retryable_http_error(400, "model overloaded, try later"));
        assert!(!is_retryable_http_error(401, "invalid token"));
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        assert_eq!(retry_delay(0).as_millis() as u64, BASE_DELAY_MS);
        assert_eq!(retry_delay(1).as_millis() as u64, BASE_DELAY_MS * 2);
        assert_eq!(retry_delay(2).as_millis() as u64, BASE_DELAY_MS * 4);
    }
}
