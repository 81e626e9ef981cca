//! Extraction of structured content from free-form completion replies.
//!
//! Two grammars are supported:
//!
//! * question replies: the first `{` through the last `}` is taken as a single
//!   JSON object, whatever text surrounds it;
//! * guidance replies: the text is cut at every `<digits>.` marker and the
//!   trimmed, non-empty fragments are kept in order.

use std::sync::LazyLock;

use quiz_core::model::Question;
use regex::Regex;
use serde::Deserialize;

use crate::error::ParseError;

static HINT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.").expect("Invalid hint marker regex"));

/// Question fields as the completion service is asked to return them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPayload {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
    pub topic: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestionPayload {
    question: String,
    options: Vec<String>,
    correct_answer: i64,
    explanation: String,
    #[serde(default)]
    topic: Option<String>,
    #[serde(default)]
    difficulty: Option<String>,
}

/// Returns the greedy slice from the first `{` to the last `}`.
#[must_use]
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Parses a question reply into a validated payload.
///
/// # Errors
///
/// Returns `ParseError` when no JSON object is present, it does not
/// deserialize, or its fields break the question invariants.
pub fn parse_question_payload(raw: &str) -> Result<QuestionPayload, ParseError> {
    let json = extract_json_object(raw).ok_or(ParseError::NoJsonObject)?;
    let payload: RawQuestionPayload = serde_json::from_str(json)?;

    let correct_answer = usize::try_from(payload.correct_answer).map_err(|_| {
        ParseError::NegativeCorrectAnswer {
            index: payload.correct_answer,
        }
    })?;
    Question::check_parts(&payload.question, payload.options.len(), correct_answer)?;

    Ok(QuestionPayload {
        question: payload.question,
        options: payload.options,
        correct_answer,
        explanation: payload.explanation,
        topic: payload.topic,
        difficulty: payload.difficulty,
    })
}

/// Splits a numbered guidance reply into hints.
///
/// Never fails; a reply without usable text yields an empty list.
#[must_use]
pub fn split_hints(raw: &str) -> Vec<String> {
    HINT_MARKER
        .split(raw)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}
