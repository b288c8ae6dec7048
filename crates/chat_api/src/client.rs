use std::future::Future;
use std::sync::{atomic::AtomicBool, atomic::Ordering, Arc};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response};

use crate::config::ChatApiConfig;
use crate::error::{parse_error_message, ChatApiError};
use crate::events::ChatStreamEvent;
use crate::payload::ChatRequest;
use crate::retry::{is_retryable_http_error, retry_delay, MAX_RETRIES};
use crate::sse::SseLineParser;
use crate::url::normalize_chat_url;

/// Optional cancellation signal shared across request and stream loops.
pub type CancellationSignal = Arc<AtomicBool>;

const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Debug)]
pub struct ChatApiClient {
    http: Client,
    config: ChatApiConfig,
}

/// Events collected from one full stream, for callers that do not need
/// per-event delivery.
#[derive(Debug, Clone)]
pub struct StreamResult {
    pub events: Vec<ChatStreamEvent>,
}

impl StreamResult {
    /// Concatenation of all content deltas, in arrival order.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for event in &self.events {
            if let ChatStreamEvent::Content { delta } = event {
                text.push_str(delta);
            }
        }
        text
    }
}

impl ChatApiClient {
    pub fn new(config: ChatApiConfig) -> Result<Self, ChatApiError> {
        if config.access_token.trim().is_empty() {
            return Err(ChatApiError::MissingAccessToken);
        }
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ChatApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ChatApiConfig {
        &self.config
    }

    pub fn endpoint(&self) -> String {
        normalize_chat_url(&self.config.base_url)
    }

    pub fn build_headers(&self) -> Result<HeaderMap, ChatApiError> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", self.config.access_token);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer)
                .map_err(|_| ChatApiError::InvalidBaseUrl("invalid access token bytes".into()))?,
        );
        if let Some(user_agent) = self.config.user_agent.as_deref() {
            headers.insert(
                reqwest::header::USER_AGENT,
                HeaderValue::from_str(user_agent).map_err(|_| {
                    ChatApiError::InvalidBaseUrl("invalid user agent value".into())
                })?,
            );
        }
        for (key, value) in &self.config.extra_headers {
            headers.insert(
                HeaderName::from_bytes(key.as_bytes())
                    .map_err(|_| ChatApiError::InvalidBaseUrl(format!("invalid header key: {key}")))?,
                HeaderValue::from_str(value).map_err(|_| {
                    ChatApiError::InvalidBaseUrl(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(headers)
    }

    pub fn build_request(
        &self,
        request: &ChatRequest,
    ) -> Result<reqwest::RequestBuilder, ChatApiError> {
        let headers = self.build_headers()?;
        let mut payload = request.clone();
        payload.stream = true;
        Ok(self.http.post(self.endpoint()).headers(headers).json(&payload))
    }

    /// Send the request, retrying transient failures with backoff. Retries
    /// stop the moment a success status is returned; stream failures after
    /// that point are not retried here.
    pub async fn send_with_retry(
        &self,
        request: &ChatRequest,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<Response, ChatApiError> {
        let mut last_status = None;
        let mut last_error = None;

        for attempt in 0..=MAX_RETRIES {
            if is_cancelled(cancellation) {
                return Err(ChatApiError::Cancelled);
            }

            let response = self.build_request(request)?.send();
            let response = await_or_cancel(response, cancellation)
                .await?
                .map_err(ChatApiError::from);

            match response {
                Ok(response) => {
                    if response.status().is_success() {
                        return Ok(response);
                    }

                    let status = response.status();
                    last_status = Some(status);
                    let body = await_or_cancel(response.text(), cancellation)
                        .await?
                        .unwrap_or_default();
                    let message = parse_error_message(status, &body);
                    last_error = Some(message.clone());

                    if attempt < MAX_RETRIES && is_retryable_http_error(status.as_u16(), &message) {
                        await_or_cancel(tokio::time::sleep(retry_delay(attempt)), cancellation)
                            .await?;
                        continue;
                    }

                    return Err(ChatApiError::Status(status, message));
                }
                Err(error) => {
                    let message = error.to_string();
                    last_error = Some(message.clone());
                    if attempt < MAX_RETRIES && is_retryable_http_error(0, &message) {
                        await_or_cancel(tokio::time::sleep(retry_delay(attempt)), cancellation)
                            .await?;
                        continue;
                    }
                    return Err(error);
                }
            }
        }

        Err(ChatApiError::RetryExhausted {
            status: last_status,
            last_error,
        })
    }

    /// Stream the response, delivering every decoded event to `on_event` in
    /// order. The handler sees zero or more `Content` events followed by
    /// exactly one `Done` or `Error`; a read failure also surfaces as the
    /// returned `Err` so callers can distinguish clean completion.
    pub async fn stream_with_handler<F>(
        &self,
        request: &ChatRequest,
        cancellation: Option<&CancellationSignal>,
        mut on_event: F,
    ) -> Result<(), ChatApiError>
    where
        F: FnMut(ChatStreamEvent),
    {
        let response = self.send_with_retry(request, cancellation).await?;
        let mut bytes = response.bytes_stream();
        let mut parser = SseLineParser::default();

        loop {
            let Some(chunk) = await_or_cancel(bytes.next(), cancellation).await? else {
                break;
            };
            if is_cancelled(cancellation) {
                return Err(ChatApiError::Cancelled);
            }

            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(error) => {
                    let detail = error.to_string();
                    on_event(ChatStreamEvent::Error {
                        detail: detail.clone(),
                    });
                    return Err(ChatApiError::Stream { detail });
                }
            };

            match parser.feed(&chunk) {
                Ok(events) => {
                    for event in events {
                        on_event(event);
                    }
                }
                Err(error) => {
                    let detail = error.to_string();
                    on_event(ChatStreamEvent::Error {
                        detail: detail.clone(),
                    });
                    return Err(error);
                }
            }

            if parser.is_finished() {
                return Ok(());
            }
        }

        if is_cancelled(cancellation) {
            return Err(ChatApiError::Cancelled);
        }

        for event in parser.finish() {
            on_event(event);
        }
        Ok(())
    }

    /// Collect the full event stream. Convenience over
    /// [`stream_with_handler`](Self::stream_with_handler).
    pub async fn stream(
        &self,
        request: &ChatRequest,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<StreamResult, ChatApiError> {
        let mut events = Vec::new();
        self.stream_with_handler(request, cancellation, |event| {
            events.push(event);
        })
        .await?;

        Ok(StreamResult { events })
    }
}

fn is_cancelled(cancel: Option<&CancellationSignal>) -> bool {
    cancel.is_some_and(|token| token.load(Ordering::Acquire))
}

async fn await_or_cancel<F>(
    future: F,
    cancellation: Option<&CancellationSignal>,
) -> Result<F::Output, ChatApiError>
where
    F: Future,
{
    if cancellation.is_none() {
        return Ok(future.await);
    }

    let mut future = Box::pin(future);

    loop {
        if is_cancelled(cancellation) {
            return Err(ChatApiError::Cancelled);
        }

        if let Ok(output) = tokio::time::timeout(CANCEL_POLL_INTERVAL, &mut future).await {
            if is_cancelled(cancellation) {
                return Err(ChatApiError::Cancelled);
            }
            return Ok(output);
        }
    }
}
