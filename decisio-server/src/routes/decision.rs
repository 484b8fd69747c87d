//! Decision evaluation route.

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use decisio_core::streaming::{encode_event_stream, run_decision_stream};
use decisio_core::types::DecisionRequest;

use crate::prompts;
use crate::state::AppState;

/// `POST /decision/evaluate`
///
/// Validates the request, then answers 200 with a `text/event-stream`
/// body. Once streaming has begun the response never fails structurally:
/// every failure surfaces as in-band `error` / `done` events.
pub async fn evaluate_decision(
    State(state): State<AppState>,
    Json(request): Json<DecisionRequest>,
) -> Response {
    if request.decision_text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "decision_text must not be empty" })),
        )
            .into_response();
    }

    let request_id = uuid::Uuid::new_v4();
    tracing::info!(
        %request_id,
        constraints = request.constraints.len(),
        "starting decision evaluation"
    );

    let system_prompt = prompts::system_prompt();
    let user_prompt = prompts::build_user_prompt(&request);
    let upstream = state.upstream.clone();
    let delay = state.stream_delay;
    let open_upstream = async move {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        upstream.stream_deltas(&system_prompt, &user_prompt).await
    };

    let events = run_decision_stream(open_upstream, state.stream_options.clone());
    let body = Body::from_stream(encode_event_stream(events));

    let mut response = Response::new(body);
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/event-stream"),
    );
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-cache"),
    );
    response
}
