//! Feedback relay: one provider call per submission, merged with placeholder scores.
//!
//! Provider failures never escape this module. They become a `fallback`
//! envelope with the same per-item structure.

use tracing::{debug, error};

use crate::feedback::models::{
    FeedbackItem, QaItem, RelayStatus, Scores, SubmitAnswersRequest, SubmitAnswersResponse,
};
use crate::feedback::prompts::build_prompt;
use crate::llm_client::ChatProvider;

pub const OK_DISCLAIMER: &str = "Automatic scores are basic (not detailed yet).";
pub const OK_COMMENTS_PREFIX: &str = "AI coach overall comments: ";
pub const OK_MESSAGE: &str = "AI feedback text from Cohere attached to each answer.";

pub const FALLBACK_DISCLAIMER: &str =
    "Scores are auto-generated at a baseline level; focus mainly on the AI coach comments.";
pub const FALLBACK_COMMENTS_HEADER: &str = "Overall AI coach comments on your interview:";
pub const FALLBACK_MESSAGE: &str = "Cohere error; using fallback scoring.";

pub async fn relay(
    provider: &dyn ChatProvider,
    request: &SubmitAnswersRequest,
) -> SubmitAnswersResponse {
    let prompt = build_prompt(&request.jd_text, &request.qa_list);

    match provider.chat(&prompt).await {
        Ok(response) => {
            let ai_text = response.text();
            debug!("{} raw text: {ai_text}", provider.name());
            ok_response(&request.qa_list, ai_text)
        }
        Err(e) => {
            error!("{} error in /submit-answers: {e}", provider.name());
            fallback_response(&request.qa_list, e.partial_text())
        }
    }
}

pub fn ok_response(qa_list: &[QaItem], ai_text: &str) -> SubmitAnswersResponse {
    let feedback = vec![
        OK_DISCLAIMER.to_string(),
        format!("{OK_COMMENTS_PREFIX}{ai_text}"),
    ];

    envelope(RelayStatus::Ok, qa_list, &feedback, OK_MESSAGE)
}

/// The comments header and text are only included when the failed call still
/// produced some text.
pub fn fallback_response(qa_list: &[QaItem], partial_text: Option<&str>) -> SubmitAnswersResponse {
    let mut feedback = vec![FALLBACK_DISCLAIMER.to_string()];
    if let Some(text) = partial_text.filter(|t| !t.is_empty()) {
        feedback.push(FALLBACK_COMMENTS_HEADER.to_string());
        feedback.push(text.to_string());
    }

    envelope(RelayStatus::Fallback, qa_list, &feedback, FALLBACK_MESSAGE)
}

fn envelope(
    status: RelayStatus,
    qa_list: &[QaItem],
    feedback: &[String],
    message: &str,
) -> SubmitAnswersResponse {
    let items: Vec<FeedbackItem> = qa_list
        .iter()
        .enumerate()
        .map(|(index, qa)| FeedbackItem {
            question_number: index + 1,
            question: qa.question.clone(),
            answer: qa.answer.clone(),
            scores: Scores::BASELINE,
            feedback: feedback.to_vec(),
        })
        .collect();

    SubmitAnswersResponse {
        status,
        total_questions: items.len(),
        items,
        message: message.to_string(),
    }
}
