//! Turning a model reply into an [`EvaluationResult`].
//!
//! The reply goes through four steps, any of which may reject it:
//! 1. Markdown code fences are stripped
//! 2. The text is parsed as JSON and must be an object
//! 3. The object is checked against the evaluation schema
//! 4. `risk_score` is coerced to an integer in `0..=100`
//!
//! Absent fields take defaults; present fields of the wrong shape are errors.

mod schema;

pub use schema::validate_reply;

use intake_core::{Decision, EvaluationResult};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Decision used when the reply omits one.
pub const DEFAULT_DECISION: Decision = Decision::NeedsReview;

/// Score used when the reply omits one.
pub const DEFAULT_RISK_SCORE: u32 = 50;

/// Summary used when the reply omits one.
pub const DEFAULT_SUMMARY: &str = "No summary provided.";

/// Highest score a reply may carry.
pub const MAX_RISK_SCORE: i64 = 100;

/// Errors from interpreting a model reply.
#[derive(Error, Debug)]
pub enum ResponseError {
    #[error("Reply is not valid JSON: {0}")]
    NotJson(#[from] serde_json::Error),

    #[error("Reply is not a JSON object")]
    NotAnObject,

    #[error("Reply does not match the evaluation schema: {}", .0.join("; "))]
    Schema(Vec<String>),

    #[error("risk_score is not an integer: {0}")]
    ScoreNotNumeric(String),

    #[error("risk_score {0} is outside 0..=100")]
    ScoreOutOfRange(i64),
}

/// Remove a surrounding Markdown code fence, if any.
///
/// Accepts an optional language tag on the opening fence when it is
/// followed by a newline. Text without a leading fence is only trimmed.
pub fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();

    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);

    let inner = match inner.split_once('\n') {
        Some((tag, rest)) if is_language_tag(tag.trim_end_matches('\r')) => rest,
        _ => inner,
    };

    inner.trim()
}

fn is_language_tag(tag: &str) -> bool {
    tag.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[derive(Debug, Deserialize)]
struct RawEvaluation {
    #[serde(default)]
    decision: Option<Decision>,
    #[serde(default)]
    risk_score: Option<JsonValue>,
    #[serde(default)]
    issues: Option<Vec<String>>,
    #[serde(default)]
    summary: Option<String>,
}

/// Parse a raw model reply into an evaluation.
pub fn parse_evaluation(content: &str) -> Result<EvaluationResult, ResponseError> {
    let value: JsonValue = serde_json::from_str(strip_code_fence(content))?;

    if !value.is_object() {
        return Err(ResponseError::NotAnObject);
    }

    validate_reply(&value).map_err(ResponseError::Schema)?;

    let raw: RawEvaluation = serde_json::from_value(value)?;

    let risk_score = match raw.risk_score {
        Some(score) => coerce_risk_score(&score)?,
        None => DEFAULT_RISK_SCORE,
    };

    Ok(EvaluationResult {
        decision: raw.decision.unwrap_or(DEFAULT_DECISION),
        risk_score,
        issues: raw.issues.unwrap_or_default(),
        summary: raw.summary.unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
    })
}

/// Coerce a `risk_score` value to an integer in `0..=100`.
///
/// Integers are taken as-is, floats are truncated toward zero, and strings
/// must hold an integer (surrounding whitespace allowed).
pub fn coerce_risk_score(value: &JsonValue) -> Result<u32, ResponseError> {
    let score = match value {
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else {
                match n.as_f64() {
                    Some(f) if f.is_finite() && f.abs() < i64::MAX as f64 => f.trunc() as i64,
                    _ => return Err(ResponseError::ScoreNotNumeric(n.to_string())),
                }
            }
        }
        JsonValue::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| ResponseError::ScoreNotNumeric(s.clone()))?,
        other => return Err(ResponseError::ScoreNotNumeric(other.to_string())),
    };

    if !(0..=MAX_RISK_SCORE).contains(&score) {
        return Err(ResponseError::ScoreOutOfRange(score));
    }

    // In range, so the narrowing is lossless.
    Ok(score as u32)
}
