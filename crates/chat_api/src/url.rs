/// Default base URL for chat transport requests.
pub const DEFAULT_CHAT_BASE_URL: &str = "https://chat.z.ai/api";

/// Normalize a base URL to a chat completions endpoint.
///
/// Normalization rules:
/// 1) keep `/chat/completions` unchanged
/// 2) append `/completions` when the path ends in `/chat`
/// 3) append `/chat/completions` otherwise
pub fn normalize_chat_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_CHAT_BASE_URL
    } else {
        input.trim()
    };

    let trimmed = base.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        return trimmed.to_string();
    }
    if trimmed.ends_with("/chat") {
        return format!("{trimmed}/completions");
    }
    format!("{trimmed}/chat/completions")
}

#[cfg(test)]
mod tests {
    use super::{normalize_chat_url, DEFAULT_CHAT_BASE_URL};

    #[test]
    fn empty_input_uses_default_base() {
        assert_eq!(
            normalize_chat_url(""),
            format!("{DEFAULT_CHAT_BASE_URL}/chat/completions")
        );
    }

    #[test]
    fn existing_endpoint_paths_are_preserved() {
        assert_eq!(
            normalize_chat_url("https://example.com/api/chat/completions/"),
            "https://example.com/api/chat/completions"
        );
        assert_eq!(
            normalize_chat_url("https://example.com/api/chat"),
            "https://example.com/api/chat/completions"
        );
    }

    #[test]
    fn bare_hosts_gain_the_full_path() {
        assert_eq!(
            normalize_chat_url("https://example.com/api"),
            "https://example.com/api/chat/completions"
        );
    }
}
