//! SSE wire encoding for outbound decision events.
//!
//! Complements the translation pipeline (model objects -> `DecisionEvent`)
//! with the encoding half (`DecisionEvent` -> SSE frame bytes).

use std::convert::Infallible;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};

use crate::types::DecisionEvent;

/// Byte stream suitable for an HTTP streaming response body.
pub type SseByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, Infallible>> + Send>>;

/// Encode one event as an SSE wire block.
///
/// The block is `event: <name>\ndata: <payload>\n\n`; the trailing blank
/// line is part of the framing. Payload JSON keeps non-ASCII characters
/// as-is.
pub fn encode_sse_event(event: &DecisionEvent) -> Bytes {
    let payload =
        serde_json::to_string(&event.payload()).unwrap_or_else(|_| "null".to_string());
    Bytes::from(format!("event: {}\ndata: {}\n\n", event.name(), payload))
}

/// Encode a whole event stream into SSE frames, one block per event.
///
/// The pipeline folds every failure into in-band events, so the byte
/// stream itself is infallible.
pub fn encode_event_stream<S>(stream: S) -> SseByteStream
where
    S: Stream<Item = DecisionEvent> + Send + 'static,
{
    Box::pin(stream.map(|event| Ok(encode_sse_event(&event))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use serde_json::json;

    #[test]
    fn exact_wire_framing() {
        let frame = encode_sse_event(&DecisionEvent::Status {
            message: "working".to_string(),
        });
        assert_eq!(
            std::str::from_utf8(&frame).unwrap(),
            "event: status\ndata: {\"message\":\"working\"}\n\n"
        );
    }

    #[test]
    fn done_frame_carries_a_bare_boolean() {
        let frame = encode_sse_event(&DecisionEvent::Done { success: true });
        assert_eq!(std::str::from_utf8(&frame).unwrap(), "event: done\ndata: true\n\n");
    }

    #[test]
    fn non_ascii_payloads_are_not_escaped() {
        let frame = encode_sse_event(&DecisionEvent::Custom {
            event_type: "note".to_string(),
            data: json!({ "text": "变化" }),
        });
        let text = std::str::from_utf8(&frame).unwrap();
        assert!(text.contains("变化"));
        assert!(!text.contains("\\u"));
    }

    #[tokio::test]
    async fn stream_encoding_preserves_order() {
        let events = vec![
            DecisionEvent::Status {
                message: "a".to_string(),
            },
            DecisionEvent::Done { success: false },
        ];
        let mut encoded = encode_event_stream(stream::iter(events));
        let first = encoded.next().await.unwrap().unwrap();
        assert!(first.starts_with(b"event: status\n"));
        let second = encoded.next().await.unwrap().unwrap();
        assert!(second.starts_with(b"event: done\n"));
        assert!(encoded.next().await.is_none());
    }
}
