use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Error as JsonError;

#[derive(Debug)]
pub enum ChatApiError {
    MissingAccessToken,
    InvalidBaseUrl(String),
    Request(reqwest::Error),
    Status(StatusCode, String),
    /// A single record line exceeded the decoder's hard size cap.
    OversizedRecord(usize),
    /// The byte stream failed after a successful response status.
    Stream { detail: String },
    RetryExhausted {
        status: Option<StatusCode>,
        last_error: Option<String>,
    },
    Serde(JsonError),
    Cancelled,
}

impl fmt::Display for ChatApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAccessToken => write!(f, "access token is required"),
            Self::InvalidBaseUrl(value) => write!(f, "invalid base URL: {value}"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Status(status, message) => write!(f, "HTTP {status} {message}"),
            Self::OversizedRecord(cap) => {
                write!(f, "stream record exceeded the {cap}-byte cap")
            }
            Self::Stream { detail } => write!(f, "failed to read stream: {detail}"),
            Self::RetryExhausted { status, last_error } => {
                let status = status
                    .map(|status| status.as_u16().to_string())
                    .unwrap_or_else(|| "n/a".to_owned());
                write!(
                    f,
                    "retry exhausted after max attempts (status: {status}, last_error: {last_error:?})"
                )
            }
            Self::Serde(error) => write!(f, "serialization error: {error}"),
            Self::Cancelled => write!(f, "request was cancelled"),
        }
    }
}

impl std::error::Error for ChatApiError {}

impl From<reqwest::Error> for ChatApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<JsonError> for ChatApiError {
    fn from(error: JsonError) -> Self {
        Self::Serde(error)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    #[serde(rename = "error")]
    pub value: Option<ErrorPayloadFields>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayloadFields {
    pub message: Option<String>,
    #[serde(rename = "detail")]
    pub detail: Option<String>,
}

/// Extract a human-readable message from an error response body, falling back
/// to the raw body or the status reason when the body is not the expected
/// `{"error": {...}}` envelope.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorPayload>(body) {
        if let Some(fields) = payload.value {
            let message = fields
                .message
                .or(fields.detail)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty());
            if let Some(message) = message {
                return message;
            }
        }
    }

    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::parse_error_message;
    use reqwest::StatusCode;

    #[test]
    fn message_field_wins_over_raw_body() {
        let body = r#"{"error":{"message":"model overloaded"}}"#;
        assert_eq!(
            parse_error_message(StatusCode::SERVICE_UNAVAILABLE, body),
            "model overloaded"
        );
    }

    #[test]
    fn non_json_body_is_passed_through() {
        assert_eq!(
            parse_error_message(StatusCode::BAD_GATEWAY, "upstream connect error"),
            "upstream connect error"
        );
    }

    #[test]
    fn empty_body_falls_back_to_status_reason() {
        assert_eq!(
            parse_error_message(StatusCode::NOT_FOUND, ""),
            "Not Found"
        );
    }
}
