//! Request and response shapes for `/submit-answers`.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

// ────────────────────────────────────────────────────────────────────────────
// Request side
// ────────────────────────────────────────────────────────────────────────────

/// One question/answer pair as submitted. Position in the list is significant.
///
/// Absent or null fields stay `None` and are omitted when echoed back.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QaItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

/// Normalized `/submit-answers` body. Never rejected: bad shapes degrade to defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmitAnswersRequest {
    pub jd_text: String,
    pub qa_list: Vec<QaItem>,
}

impl SubmitAnswersRequest {
    /// Parses a raw request body leniently.
    pub fn from_body(body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::default();
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                warn!("Request body is not valid JSON ({e}); using empty defaults");
                Self::default()
            }
        }
    }

    pub fn from_value(value: &Value) -> Self {
        let jd_text = match value.get("jd_text") {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        };

        let qa_list = match value.get("qa_list") {
            Some(Value::Array(items)) => items.iter().map(QaItem::from_value).collect(),
            _ => Vec::new(),
        };

        Self { jd_text, qa_list }
    }
}

impl QaItem {
    fn from_value(value: &Value) -> Self {
        Self {
            question: field_text(value, "question"),
            answer: field_text(value, "answer"),
        }
    }
}

/// Strings pass through untouched; other non-null values keep their JSON text.
fn field_text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Response side
// ────────────────────────────────────────────────────────────────────────────

/// Placeholder scores. Not derived from model output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scores {
    pub relevance: u8,
    pub depth: u8,
    pub structure: u8,
    pub keyword_match: u8,
}

impl Scores {
    pub const BASELINE: Scores = Scores {
        relevance: 7,
        depth: 7,
        structure: 7,
        keyword_match: 7,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackItem {
    pub question_number: usize, // 1-based
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    pub scores: Scores,
    pub feedback: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayStatus {
    Ok,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitAnswersResponse {
    pub status: RelayStatus,
    pub total_questions: usize,
    pub items: Vec<FeedbackItem>,
    pub message: String,
}
