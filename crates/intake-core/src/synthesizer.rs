//! Synthesizer: turns an accumulated score into a final verdict.
//!
//! The thresholds are fixed policy:
//! 1. score < 30 → approve
//! 2. 30 ≤ score < 60 → needs_review
//! 3. score ≥ 60 → reject

use crate::types::{Decision, EvaluationResult};

/// Lowest score that requires a human review.
pub const NEEDS_REVIEW_THRESHOLD: u32 = 30;

/// Lowest score that rejects the request outright.
pub const REJECT_THRESHOLD: u32 = 60;

/// Map a risk score onto a decision.
pub fn decide(score: u32) -> Decision {
    if score < NEEDS_REVIEW_THRESHOLD {
        Decision::Approve
    } else if score < REJECT_THRESHOLD {
        Decision::NeedsReview
    } else {
        Decision::Reject
    }
}

/// The Synthesizer aggregates a rule score into a final result.
#[derive(Debug)]
pub struct Synthesizer;

impl Synthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Build the evaluation result for a rule-based score.
    pub fn synthesize(&self, score: u32, issues: Vec<String>) -> EvaluationResult {
        let summary = self.build_summary(score, issues.len());
        EvaluationResult {
            decision: decide(score),
            risk_score: score,
            issues,
            summary,
        }
    }

    fn build_summary(&self, score: u32, issue_count: usize) -> String {
        format!(
            "Rule-based evaluation score {} with {} issue(s).",
            score, issue_count
        )
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new()
    }
}
