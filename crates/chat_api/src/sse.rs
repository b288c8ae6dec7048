use serde::Deserialize;

use crate::error::ChatApiError;
use crate::events::ChatStreamEvent;

/// Initial capacity of the carry-over buffer. Lines below this length never
/// force a reallocation.
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// Hard cap on a single record line. A line still incomplete past this size
/// fails the stream.
pub const MAX_RECORD_BYTES: usize = 2 * 1024 * 1024;

const DATA_PREFIX: &str = "data: ";
const DONE_SENTINEL: &str = "[DONE]";
const COMPLETION_RECORD_TYPE: &str = "chat:completion";

/// Wire record payload. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
struct WireRecord {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    data: WireRecordData,
}

#[derive(Debug, Default, Deserialize)]
struct WireRecordData {
    #[serde(default)]
    delta_content: String,
    #[serde(default)]
    done: bool,
}

/// Incremental decoder for line-oriented `data:`-framed event streams.
///
/// Feed it raw bytes as they arrive; complete lines are drained into
/// [`ChatStreamEvent`]s. Lines without the `data: ` prefix are protocol
/// padding and are skipped, as are payloads that fail to parse. Once a
/// terminal event has been emitted the parser ignores further input.
#[derive(Debug)]
pub struct SseLineParser {
    buffer: Vec<u8>,
    finished: bool,
}

impl Default for SseLineParser {
    fn default() -> Self {
        Self {
            buffer: Vec::with_capacity(DEFAULT_BUFFER_CAPACITY),
            finished: false,
        }
    }
}

impl SseLineParser {
    /// Feed arbitrary bytes into the parser and drain the events they
    /// complete. A chunk boundary may fall anywhere, including inside a
    /// multi-byte character.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<Vec<ChatStreamEvent>, ChatApiError> {
        let mut events = Vec::new();
        if self.finished {
            return Ok(events);
        }

        self.buffer.extend_from_slice(bytes);

        while let Some(split) = self.buffer.iter().position(|byte| *byte == b'\n') {
            if split > MAX_RECORD_BYTES {
                self.finished = true;
                self.buffer.clear();
                return Err(ChatApiError::OversizedRecord(MAX_RECORD_BYTES));
            }
            let line: Vec<u8> = self.buffer.drain(..=split).collect();
            let line = String::from_utf8_lossy(&line[..split]);
            if decode_line(line.trim(), &mut events) {
                self.finished = true;
                self.buffer.clear();
                return Ok(events);
            }
        }

        if self.buffer.len() > MAX_RECORD_BYTES {
            self.finished = true;
            self.buffer.clear();
            return Err(ChatApiError::OversizedRecord(MAX_RECORD_BYTES));
        }

        Ok(events)
    }

    /// Signal end of input. Flushes a trailing line that never received its
    /// newline and emits the implicit `Done` when the stream never carried an
    /// explicit terminal record.
    pub fn finish(&mut self) -> Vec<ChatStreamEvent> {
        let mut events = Vec::new();
        if self.finished {
            return events;
        }

        if !self.buffer.is_empty() {
            let line = String::from_utf8_lossy(&self.buffer).into_owned();
            decode_line(line.trim(), &mut events);
            self.buffer.clear();
        }

        self.finished = true;
        if !events.last().is_some_and(ChatStreamEvent::is_terminal) {
            events.push(ChatStreamEvent::Done);
        }
        events
    }

    /// Returns true once a terminal event has been emitted.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Decode one trimmed line, appending any events it yields. Returns true when
/// the line terminates the stream.
fn decode_line(line: &str, events: &mut Vec<ChatStreamEvent>) -> bool {
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return false;
    };
    let payload = payload.trim();

    if payload == DONE_SENTINEL {
        events.push(ChatStreamEvent::Done);
        return true;
    }

    let Ok(record) = serde_json::from_str::<WireRecord>(payload) else {
        return false;
    };

    if record.kind == COMPLETION_RECORD_TYPE && !record.data.delta_content.is_empty() {
        events.push(ChatStreamEvent::Content {
            delta: record.data.delta_content,
        });
    }

    if record.data.done {
        events.push(ChatStreamEvent::Done);
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::{SseLineParser, MAX_RECORD_BYTES};
    use crate::error::ChatApiError;
    use crate::events::ChatStreamEvent;

    fn content(delta: &str) -> ChatStreamEvent {
        ChatStreamEvent::Content {
            delta: delta.to_string(),
        }
    }

    #[test]
    fn decodes_delta_then_done_sentinel() {
        let mut parser = SseLineParser::default();
        let events = parser
            .feed(b"data: {\"type\":\"chat:completion\",\"data\":{\"delta_content\":\"Hi\"}}\ndata: [DONE]\n")
            .expect("feed should succeed");

        assert_eq!(events, vec![content("Hi"), ChatStreamEvent::Done]);
        assert!(parser.is_finished());
    }

    #[test]
    fn chunk_boundaries_may_split_lines_and_characters() {
        let mut parser = SseLineParser::default();
        let record = "data: {\"type\":\"chat:completion\",\"data\":{\"delta_content\":\"héllo\"}}\n";
        let bytes = record.as_bytes();
        let mut events = Vec::new();

        // Split inside the two-byte 'é'.
        let split = record.find('é').expect("é present") + 1;
        events.extend(parser.feed(&bytes[..split]).expect("first half"));
        assert!(events.is_empty());
        events.extend(parser.feed(&bytes[split..]).expect("second half"));

        assert_eq!(events, vec![content("héllo")]);
    }

    #[test]
    fn non_data_lines_and_malformed_payloads_are_skipped() {
        let mut parser = SseLineParser::default();
        let events = parser
            .feed(b": keep-alive\nevent: ping\ndata: {not json}\ndata: {\"type\":\"chat:completion\",\"data\":{\"delta_content\":\"ok\"}}\n")
            .expect("feed should succeed");

        assert_eq!(events, vec![content("ok")]);
    }

    #[test]
    fn nested_done_flag_terminates_regardless_of_type() {
        let mut parser = SseLineParser::default();
        let events = parser
            .feed(b"data: {\"type\":\"chat:metadata\",\"data\":{\"done\":true}}\n")
            .expect("feed should succeed");

        assert_eq!(events, vec![ChatStreamEvent::Done]);
        assert!(parser.is_finished());
    }

    #[test]
    fn record_may_carry_delta_and_done_together() {
        let mut parser = SseLineParser::default();
        let events = parser
            .feed(b"data: {\"type\":\"chat:completion\",\"data\":{\"delta_content\":\"end\",\"done\":true}}\n")
            .expect("feed should succeed");

        assert_eq!(events, vec![content("end"), ChatStreamEvent::Done]);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut parser = SseLineParser::default();
        let events = parser
            .feed(b"data: {\"type\":\"chat:completion\",\"extra\":1,\"data\":{\"delta_content\":\"x\",\"phase\":\"answer\",\"usage\":{}}}\n")
            .expect("feed should succeed");

        assert_eq!(events, vec![content("x")]);
    }

    #[test]
    fn end_of_input_is_an_implicit_done() {
        let mut parser = SseLineParser::default();
        let events = parser
            .feed(b"data: {\"type\":\"chat:completion\",\"data\":{\"delta_content\":\"partial\"}}\n")
            .expect("feed should succeed");
        assert_eq!(events, vec![content("partial")]);

        assert_eq!(parser.finish(), vec![ChatStreamEvent::Done]);
        assert!(parser.finish().is_empty());
    }

    #[test]
    fn finish_flushes_a_trailing_unterminated_line() {
        let mut parser = SseLineParser::default();
        parser
            .feed(b"data: {\"type\":\"chat:completion\",\"data\":{\"delta_content\":\"tail\"}}")
            .expect("feed should succeed");

        assert_eq!(
            parser.finish(),
            vec![content("tail"), ChatStreamEvent::Done]
        );
    }

    #[test]
    fn input_after_terminal_event_is_dropped() {
        let mut parser = SseLineParser::default();
        parser.feed(b"data: [DONE]\n").expect("feed should succeed");

        let events = parser
            .feed(b"data: {\"type\":\"chat:completion\",\"data\":{\"delta_content\":\"late\"}}\n")
            .expect("feed should succeed");
        assert!(events.is_empty());
    }

    #[test]
    fn oversized_record_fails_the_stream() {
        let mut parser = SseLineParser::default();
        let giant = vec![b'a'; MAX_RECORD_BYTES + 1];
        let error = parser.feed(&giant).expect_err("cap should trip");

        assert!(matches!(error, ChatApiError::OversizedRecord(_)));
        assert!(parser.is_finished());
    }

    #[test]
    fn empty_delta_content_is_not_an_event() {
        let mut parser = SseLineParser::default();
        let events = parser
            .feed(b"data: {\"type\":\"chat:completion\",\"data\":{\"delta_content\":\"\"}}\n")
            .expect("feed should succeed");

        assert!(events.is_empty());
    }
}
