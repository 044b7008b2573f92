//! Data contracts shared by every evaluation path.
//!
//! These types carry no behavior beyond construction helpers. Validation of
//! free-text fields lives in [`crate::validation`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An onboarding questionnaire submitted by a prospective customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkRequest {
    pub company_name: String,

    pub industry: String,

    /// Must be a syntactically valid email address
    pub contact_email: String,

    /// Region labels, e.g. "APAC", "EMEA"
    pub regions: Vec<String>,

    /// "low" | "medium" | "high", compared case-insensitively
    pub traffic_level: String,

    /// e.g. "AWS", "Azure"
    pub cloud_providers: Vec<String>,

    /// e.g. "Online banking portal"
    pub critical_apps: Vec<String>,

    pub has_waf: bool,

    pub has_mfa_for_admins: bool,

    /// Free text, searched for keywords
    pub logging_strategy: String,

    /// e.g. "PCI-DSS", "ISO27001"
    pub compliance: Vec<String>,
}

/// Verdict for an onboarding request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    NeedsReview,
    Reject,
}

impl Decision {
    /// Wire representation of the decision.
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approve => "approve",
            Decision::NeedsReview => "needs_review",
            Decision::Reject => "reject",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of either the rule engine or the LLM evaluator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluationResult {
    pub decision: Decision,

    /// Nominally 0-100. Rule-based scores are the raw additive sum and may
    /// exceed 100.
    pub risk_score: u32,

    /// Human-readable deficiencies; empty when nothing was found
    pub issues: Vec<String>,

    /// One-line explanation
    pub summary: String,
}

/// A persisted onboarding request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredRequest {
    /// Generated at submission time, never changes
    pub id: String,

    /// Generated at submission time, never changes
    pub created_at: DateTime<Utc>,

    pub request: NetworkRequest,

    #[serde(default)]
    pub evaluation: Option<EvaluationResult>,
}

impl StoredRequest {
    /// Wrap a freshly submitted request that has not been evaluated.
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>, request: NetworkRequest) -> Self {
        Self {
            id: id.into(),
            created_at,
            request,
            evaluation: None,
        }
    }
}
