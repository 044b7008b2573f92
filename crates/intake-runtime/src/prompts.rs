//! Prompts for the onboarding reviewer.
//!
//! The system prompt fixes the persona and the output shape. The user prompt
//! carries the submission as pretty-printed JSON and nothing else that varies
//! between calls.

use intake_core::NetworkRequest;

use crate::providers::ChatMessage;

/// System prompt for the reviewer persona.
///
/// The JSON shape here must stay in step with
/// `schema/evaluation.schema.json`, which is what the reply is checked
/// against.
pub const SYSTEM_PROMPT: &str = r#"You are a senior security architect. You review onboarding forms for new customer networks.

You MUST respond ONLY with a single JSON object using this schema:
{
  "decision": "approve" | "needs_review" | "reject",
  "risk_score": number between 0 and 100,
  "issues": [string, ...],
  "summary": string
}
Do not include any extra commentary. Be strict but fair."#;

/// Closing directive appended to every user prompt.
pub const RESPONSE_DIRECTIVE: &str =
    "Analyse this request and return ONLY the JSON object described above.";

/// Build the user prompt around a serialized request.
pub fn build_user_prompt(request_json: &str) -> String {
    format!(
        "Here is the onboarding request JSON:\n\n{}\n\n{}",
        request_json, RESPONSE_DIRECTIVE
    )
}

/// Build the `[system, user]` message pair for one evaluation.
pub fn build_messages(request: &NetworkRequest) -> Result<Vec<ChatMessage>, serde_json::Error> {
    let request_json = serde_json::to_string_pretty(request)?;
    Ok(vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(build_user_prompt(&request_json)),
    ])
}
