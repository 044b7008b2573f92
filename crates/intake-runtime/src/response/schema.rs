//! JSON Schema check for model replies.
//!
//! Replies are validated against `schema/evaluation.schema.json`, embedded at
//! compile time and compiled once.

use std::sync::OnceLock;

/// Embedded evaluation schema.
const EVALUATION_SCHEMA_JSON: &str = include_str!("../../../../schema/evaluation.schema.json");

/// Compiled validator (initialized once, reused across calls).
static COMPILED_SCHEMA: OnceLock<Result<jsonschema::Validator, String>> = OnceLock::new();

fn get_validator() -> Result<&'static jsonschema::Validator, String> {
    let result = COMPILED_SCHEMA.get_or_init(|| {
        let schema_value: serde_json::Value = serde_json::from_str(EVALUATION_SCHEMA_JSON)
            .map_err(|e| format!("Invalid schema JSON: {}", e))?;

        jsonschema::options()
            .build(&schema_value)
            .map_err(|e| format!("Failed to compile schema: {}", e))
    });

    result.as_ref().map_err(Clone::clone)
}

/// Validate a parsed reply against the evaluation schema.
///
/// Returns every violation as `"<message> at <pointer>"`.
pub fn validate_reply(reply: &serde_json::Value) -> Result<(), Vec<String>> {
    let validator = get_validator().map_err(|e| vec![e])?;

    let errors: Vec<String> = validator
        .iter_errors(reply)
        .map(|e| format!("{} at {}", e, e.instance_path))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
