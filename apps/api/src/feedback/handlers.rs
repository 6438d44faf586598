//! Axum route handlers for the feedback relay.

use axum::{extract::State, Json};
use bytes::Bytes;
use tracing::{debug, info};

use crate::feedback::models::{SubmitAnswersRequest, SubmitAnswersResponse};
use crate::feedback::relay::relay;
use crate::state::AppState;

/// POST /submit-answers (also mounted at /api/submit-answers)
///
/// Always answers 200. Malformed input degrades to empty defaults and provider
/// failures come back as `status: "fallback"`.
pub async fn handle_submit_answers(
    State(state): State<AppState>,
    body: Bytes,
) -> Json<SubmitAnswersResponse> {
    let request = SubmitAnswersRequest::from_body(&body);

    info!("Received JD length: {}", request.jd_text.chars().count());
    info!("Received QA count: {}", request.qa_list.len());
    debug!("Request body: {}", String::from_utf8_lossy(&body));

    let result = relay(state.provider.as_ref(), &request).await;

    if let Ok(json) = serde_json::to_string_pretty(&result) {
        debug!("Result: {json}");
    }

    Json(result)
}
