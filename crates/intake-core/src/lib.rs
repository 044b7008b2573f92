//! # intake-core
//!
//! Deterministic risk evaluation for network onboarding requests.
//!
//! This crate answers, for a prospective customer's security questionnaire:
//! - How risky is this network to onboard?
//! - Which deficiencies drove that score?
//! - Should the request be approved, reviewed, or rejected?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same request always produces the same evaluation
//! 2. **No I/O**: No network, no filesystem, no LLM calls
//! 3. **Additive**: The risk score is exactly the sum of the rules that fired
//!
//! ## Example
//!
//! ```rust,ignore
//! use intake_core::{evaluate, Decision, NetworkRequest};
//!
//! let request: NetworkRequest = serde_json::from_str(body)?;
//! request.validate()?;
//!
//! let result = evaluate(&request);
//! match result.decision {
//!     Decision::Approve => println!("OK: {}", result.summary),
//!     Decision::NeedsReview => println!("REVIEW: {:?}", result.issues),
//!     Decision::Reject => println!("REJECT: score {}", result.risk_score),
//! }
//! ```

pub mod rules;
pub mod synthesizer;
pub mod types;
pub mod validation;

// Re-export main types at crate root
pub use rules::{RuleEngine, ScoringRule, SCORING_RULES};
pub use synthesizer::{decide, Synthesizer, NEEDS_REVIEW_THRESHOLD, REJECT_THRESHOLD};
pub use types::{Decision, EvaluationResult, NetworkRequest, StoredRequest};
pub use validation::{FieldError, ValidationErrors};

/// Evaluate an onboarding request with the rule engine.
///
/// This is the main entry point for deterministic evaluation. It never fails
/// for a well-formed request.
pub fn evaluate(request: &NetworkRequest) -> EvaluationResult {
    RuleEngine::new().evaluate(request)
}
