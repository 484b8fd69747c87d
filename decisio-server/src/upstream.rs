//! Streaming client for the upstream OpenAI-compatible chat-completions
//! API.

use std::sync::Arc;

use decisio_core::EngineError;
use decisio_core::streaming::DeltaStream;
use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;

use crate::config::UpstreamConfig;

/// SSE payload that marks end-of-stream on OpenAI-compatible APIs.
const DONE_MARKER: &str = "[DONE]";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionsBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    stream: bool,
}

/// Long-lived client for the upstream chat-completions endpoint.
///
/// Built once at startup over a shared connection pool; each request opens
/// its own streaming completion. No timeout is applied to the streaming
/// call at this layer.
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    http: reqwest::Client,
    config: Arc<UpstreamConfig>,
}

impl ChatCompletionsClient {
    pub fn new(http: reqwest::Client, config: UpstreamConfig) -> Self {
        Self {
            http,
            config: Arc::new(config),
        }
    }

    /// Open a streaming chat completion and yield its content deltas.
    ///
    /// A non-success status is an `ApiError` carrying the response body;
    /// after that the stream yields every non-empty `delta.content`
    /// fragment until the `[DONE]` marker or the connection ends.
    pub async fn stream_deltas(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<DeltaStream, EngineError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let body = ChatCompletionsBody {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.config.temperature,
            stream: true,
        };

        tracing::debug!(url = %url, model = %self.config.model, "opening chat completions stream");

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| EngineError::HttpError(format!("chat completions request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EngineError::ApiError {
                code: status.as_u16(),
                message,
            });
        }

        let byte_stream = response.bytes_stream();
        let deltas = async_stream::stream! {
            let mut events = byte_stream.eventsource();
            while let Some(item) = events.next().await {
                let event = match item {
                    Ok(event) => event,
                    Err(e) => {
                        yield Err(EngineError::StreamError(format!("SSE stream error: {e}")));
                        return;
                    }
                };

                let data = event.data.trim();
                if data.is_empty() || data == DONE_MARKER {
                    continue;
                }

                let payload: Value = match serde_json::from_str(data) {
                    Ok(value) => value,
                    Err(e) => {
                        yield Err(EngineError::ParseError(format!(
                            "failed to parse upstream SSE JSON: {e}"
                        )));
                        return;
                    }
                };

                // Role-only chunks, finish chunks, and usage frames carry
                // no content and are skipped.
                if let Some(delta) = extract_content_delta(&payload)
                    && !delta.is_empty()
                {
                    yield Ok(delta);
                }
            }
        };

        Ok(Box::pin(deltas))
    }
}

/// Pull `choices[0].delta.content` out of one stream chunk.
fn extract_content_delta(payload: &Value) -> Option<String> {
    payload
        .get("choices")?
        .get(0)?
        .get("delta")?
        .get("content")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_content_from_stream_chunks() {
        let chunk = json!({
            "id": "c1",
            "choices": [{ "index": 0, "delta": { "content": "{\"type\":" } }],
        });
        assert_eq!(extract_content_delta(&chunk).as_deref(), Some("{\"type\":"));
    }

    #[test]
    fn tolerates_chunks_without_content() {
        for chunk in [
            json!({ "choices": [{ "delta": { "role": "assistant" } }] }),
            json!({ "choices": [{ "delta": {}, "finish_reason": "stop" }] }),
            json!({ "choices": [] }),
            json!({ "usage": { "total_tokens": 12 } }),
        ] {
            assert_eq!(extract_content_delta(&chunk), None);
        }
    }

    #[test]
    fn request_body_shape() {
        let body = ChatCompletionsBody {
            model: "sonar",
            messages: vec![ChatMessage {
                role: "system",
                content: "rules",
            }],
            temperature: 0.3,
            stream: true,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "sonar");
        assert_eq!(value["stream"], true);
        assert_eq!(value["messages"][0]["role"], "system");
    }
}
