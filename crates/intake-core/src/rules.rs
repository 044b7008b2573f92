//! Rule engine: additive point scoring over an onboarding request.
//!
//! Each rule is a named predicate worth a fixed number of points. Rules are
//! independent, so the order in which they run never changes the total.
//! Rules with issue text also contribute one human-readable issue when they
//! fire.

use crate::synthesizer::Synthesizer;
use crate::types::{EvaluationResult, NetworkRequest};

/// A single scoring rule.
#[derive(Debug, Clone, Copy)]
pub struct ScoringRule {
    /// Stable identifier used in logs
    pub id: &'static str,

    /// Points added when the rule fires
    pub points: u32,

    /// Issue reported when the rule fires, if any
    pub issue: Option<&'static str>,

    /// Returns true when the request triggers this rule
    pub check: fn(&NetworkRequest) -> bool,
}

impl ScoringRule {
    pub fn fires(&self, request: &NetworkRequest) -> bool {
        (self.check)(request)
    }
}

/// The built-in scoring table.
pub static SCORING_RULES: &[ScoringRule] = &[
    ScoringRule {
        id: "high_traffic",
        points: 20,
        issue: None,
        check: is_high_traffic,
    },
    ScoringRule {
        id: "apac_region",
        points: 10,
        issue: None,
        check: serves_apac,
    },
    ScoringRule {
        id: "missing_waf",
        points: 30,
        issue: Some("No WAF in front of critical applications."),
        check: lacks_waf,
    },
    ScoringRule {
        id: "missing_admin_mfa",
        points: 25,
        issue: Some("MFA is not enabled for admin accounts."),
        check: lacks_admin_mfa,
    },
    ScoringRule {
        id: "decentralized_logging",
        points: 15,
        issue: Some("Logging does not appear to be clearly centralized."),
        check: lacks_centralized_logging,
    },
    ScoringRule {
        id: "no_major_compliance",
        points: 20,
        issue: Some("No major compliance frameworks (PCI/ISO) are listed."),
        check: lacks_major_compliance,
    },
];

fn is_high_traffic(request: &NetworkRequest) -> bool {
    request.traffic_level.to_lowercase() == "high"
}

fn serves_apac(request: &NetworkRequest) -> bool {
    request.regions.iter().any(|r| r.to_uppercase() == "APAC")
}

fn lacks_waf(request: &NetworkRequest) -> bool {
    !request.has_waf
}

fn lacks_admin_mfa(request: &NetworkRequest) -> bool {
    !request.has_mfa_for_admins
}

fn lacks_centralized_logging(request: &NetworkRequest) -> bool {
    !request.logging_strategy.to_lowercase().contains("centralized")
}

fn lacks_major_compliance(request: &NetworkRequest) -> bool {
    !request.compliance.iter().any(|c| {
        let upper = c.to_uppercase();
        upper.contains("PCI") || upper.contains("ISO")
    })
}

/// Deterministic evaluator over a fixed rule table.
#[derive(Debug)]
pub struct RuleEngine {
    rules: &'static [ScoringRule],
    synthesizer: Synthesizer,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self {
            rules: SCORING_RULES,
            synthesizer: Synthesizer::new(),
        }
    }

    /// Rules that fire for this request, in table order.
    pub fn triggered(&self, request: &NetworkRequest) -> Vec<&'static ScoringRule> {
        self.rules.iter().filter(|rule| rule.fires(request)).collect()
    }

    /// Score a request and synthesize the final result.
    pub fn evaluate(&self, request: &NetworkRequest) -> EvaluationResult {
        let triggered = self.triggered(request);

        let score: u32 = triggered.iter().map(|rule| rule.points).sum();
        let issues: Vec<String> = triggered
            .iter()
            .filter_map(|rule| rule.issue)
            .map(str::to_string)
            .collect();

        tracing::debug!(
            company = %request.company_name,
            score,
            rules = ?triggered.iter().map(|r| r.id).collect::<Vec<_>>(),
            "Rule-based evaluation"
        );

        self.synthesizer.synthesize(score, issues)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}
