use crate::feedback::models::QaItem;

/// Coaching instruction placed at the top of every prompt.
pub const COACH_INSTRUCTION: &str = "You are an interview coach. \
    Read the job description and the candidate's answers. \
    For each answer, give short feedback in 1-2 sentences. \
    Do NOT return JSON, just plain text paragraphs.";

/// Builds the single user turn sent to the provider.
///
/// The QA list is rendered as pretty-printed JSON (2-space indent), order preserved.
pub fn build_prompt(jd_text: &str, qa_list: &[QaItem]) -> String {
    let qa_json = serde_json::to_string_pretty(qa_list).unwrap_or_else(|_| "[]".to_string());

    format!(
        "{COACH_INSTRUCTION}\n\n\
         Job description:\n\
         {jd_text}\n\n\
         Questions and answers:\n\
         {qa_json}"
    )
}
