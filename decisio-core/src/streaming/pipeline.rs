//! Per-request stream orchestration.

use std::future::Future;
use std::pin::Pin;

use futures_util::{Stream, StreamExt, pin_mut};

use crate::error::EngineError;
use crate::streaming::{ObjectSegmenter, ObjectTranslator};
use crate::types::DecisionEvent;

/// Outbound event stream for one request.
///
/// Failures are folded into in-band `error` / `done` events, so the stream
/// itself never yields an error.
pub type DecisionEventStream = Pin<Box<dyn Stream<Item = DecisionEvent> + Send>>;

/// Token deltas from the upstream model.
pub type DeltaStream = Pin<Box<dyn Stream<Item = Result<String, EngineError>> + Send>>;

/// Options controlling the orchestrated stream.
#[derive(Debug, Clone)]
pub struct StreamOptions {
    /// Message for the immediate initial `status` event.
    pub status_message: String,

    /// Whether to replace error detail with a masked message.
    ///
    /// Recommended for production so upstream failures never leak
    /// provider detail to clients.
    pub mask_errors: bool,

    /// Custom masked message. `None` uses "internal error".
    pub masked_error_message: Option<String>,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            status_message: "Analyzing decision using personal intelligence model".to_string(),
            mask_errors: true,
            masked_error_message: None,
        }
    }
}

impl StreamOptions {
    /// Options suitable for production (errors masked).
    pub fn production() -> Self {
        Self::default()
    }

    /// Options suitable for development (errors not masked).
    pub fn development() -> Self {
        Self {
            mask_errors: false,
            ..Self::default()
        }
    }

    fn error_message(&self, error: &EngineError) -> String {
        if self.mask_errors {
            self.masked_error_message
                .clone()
                .unwrap_or_else(|| "internal error".to_string())
        } else {
            error.user_message()
        }
    }
}

/// Drive one request end-to-end.
///
/// Emits the initial `status` event, then awaits `open_upstream`, then
/// fans every token delta through the segmenter and translator, yielding
/// each outbound event immediately. Exactly one terminal `done` event is
/// emitted on every path:
///
/// - audit fan-out seen: upstream consumption stops at once, `done true`
///   (already part of the fan-out);
/// - upstream open or mid-stream failure: `error` then `done false`;
/// - upstream exhausted without an audit: safety-net `done false`, no
///   error event.
///
/// The upstream open is deferred behind a future so the status event is
/// always delivered first, even when the connection attempt fails.
pub fn run_decision_stream<F, S>(open_upstream: F, options: StreamOptions) -> DecisionEventStream
where
    F: Future<Output = Result<S, EngineError>> + Send + 'static,
    S: Stream<Item = Result<String, EngineError>> + Send + 'static,
{
    let stream = async_stream::stream! {
        yield DecisionEvent::Status {
            message: options.status_message.clone(),
        };

        let deltas = match open_upstream.await {
            Ok(deltas) => deltas,
            Err(error) => {
                tracing::warn!(error = %error, "failed to open upstream model stream");
                yield DecisionEvent::Error {
                    message: options.error_message(&error),
                };
                yield DecisionEvent::Done { success: false };
                return;
            }
        };
        pin_mut!(deltas);

        let mut segmenter = ObjectSegmenter::new();
        let mut translator = ObjectTranslator::new();

        while let Some(item) = deltas.next().await {
            let delta = match item {
                Ok(delta) => delta,
                Err(error) => {
                    tracing::warn!(error = %error, "upstream model stream failed");
                    yield DecisionEvent::Error {
                        message: options.error_message(&error),
                    };
                    yield DecisionEvent::Done { success: false };
                    return;
                }
            };

            for object in segmenter.push(&delta) {
                for event in translator.translate(object) {
                    yield event;
                }
            }

            if translator.is_finished() {
                // The audit fan-out ended the logical stream; stop reading
                // whatever the model is still sending.
                return;
            }
        }

        segmenter.finish();
        if !translator.is_finished() {
            // Upstream ended without a decision_audit. The client must
            // still observe a terminus.
            tracing::debug!("upstream ended without an audit; emitting safety-net done");
            yield DecisionEvent::Done { success: false };
        }
    };

    Box::pin(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    async fn collect(stream: DecisionEventStream) -> Vec<DecisionEvent> {
        stream.collect().await
    }

    #[tokio::test]
    async fn open_failure_yields_status_error_done() {
        let open = async {
            Err::<stream::Iter<std::vec::IntoIter<Result<String, EngineError>>>, _>(
                EngineError::HttpError("refused".to_string()),
            )
        };
        let events = collect(run_decision_stream(open, StreamOptions::development())).await;

        let names: Vec<&str> = events.iter().map(DecisionEvent::name).collect();
        assert_eq!(names, vec!["status", "error", "done"]);
        assert_eq!(events.last(), Some(&DecisionEvent::Done { success: false }));
    }

    #[tokio::test]
    async fn masked_errors_hide_detail() {
        let open = async {
            Err::<stream::Iter<std::vec::IntoIter<Result<String, EngineError>>>, _>(
                EngineError::HttpError("secret host unreachable".to_string()),
            )
        };
        let events = collect(run_decision_stream(open, StreamOptions::production())).await;

        let DecisionEvent::Error { message } = &events[1] else {
            panic!("expected error event");
        };
        assert_eq!(message, "internal error");
    }

    #[tokio::test]
    async fn mid_stream_failure_still_terminates() {
        let deltas: Vec<Result<String, EngineError>> = vec![
            Ok(r#"{"type":"status","message":"thinking"}"#.to_string()),
            Err(EngineError::StreamError("reset".to_string())),
        ];
        let open = async { Ok(stream::iter(deltas)) };
        let events = collect(run_decision_stream(open, StreamOptions::development())).await;

        let names: Vec<&str> = events.iter().map(DecisionEvent::name).collect();
        assert_eq!(names, vec!["status", "status", "error", "done"]);
        assert_eq!(events.last(), Some(&DecisionEvent::Done { success: false }));
    }
}
