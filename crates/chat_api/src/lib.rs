//! Transport-only chat streaming client primitives.
//!
//! This crate owns request building, SSE decoding, and response accumulation
//! for a chat-completions style endpoint. It intentionally contains no auth
//! persistence and no terminal/rendering coupling.
//!
//! The wire contract is a line-oriented `data: <payload>` event stream whose
//! payloads carry `{type, data: {delta_content, done}}` records, terminated by
//! a `[DONE]` sentinel or a record with `done: true`.

pub mod accumulator;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod payload;
pub mod retry;
pub mod sse;
pub mod url;

pub use accumulator::ResponseAccumulator;
pub use client::{CancellationSignal, ChatApiClient, StreamResult};
pub use config::ChatApiConfig;
pub use error::ChatApiError;
pub use events::ChatStreamEvent;
pub use payload::{ChatMessage, ChatRequest};
pub use sse::SseLineParser;
pub use url::normalize_chat_url;
