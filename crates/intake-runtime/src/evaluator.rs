//! LLM-assisted evaluation with rule-based fallback.
//!
//! [`LlmEvaluator::evaluate`] never fails. Any problem on the model path
//! (transport, timeout, malformed reply) is logged and the rule engine's
//! result is returned in its place with [`FALLBACK_SUMMARY`] as the summary.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use intake_core::{EvaluationResult, NetworkRequest, RuleEngine};

use crate::config::EvaluatorConfig;
use crate::prompts;
use crate::providers::{LlmProvider, ProviderError};
use crate::response::{self, ResponseError};

/// Summary attached to a rule-based result that stands in for the model.
pub const FALLBACK_SUMMARY: &str = "AI scoring is currently unavailable, so this evaluation was produced by the rule-based scoring engine instead.";

/// Errors on the model path. Only visible through [`LlmEvaluator::try_evaluate`].
#[derive(Error, Debug)]
pub enum EvaluatorError {
    #[error("Failed to serialize request: {0}")]
    Prompt(#[from] serde_json::Error),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Evaluation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Unusable model reply: {0}")]
    Response(#[from] ResponseError),
}

/// Evaluates requests through a completion service.
pub struct LlmEvaluator {
    provider: Arc<dyn LlmProvider>,
    config: EvaluatorConfig,
    rules: RuleEngine,
}

impl std::fmt::Debug for LlmEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmEvaluator")
            .field("provider", &self.provider.name())
            .field("config", &self.config)
            .finish()
    }
}

impl LlmEvaluator {
    /// Create an evaluator around a provider.
    pub fn new(provider: Arc<dyn LlmProvider>, config: EvaluatorConfig) -> Self {
        Self {
            provider,
            config,
            rules: RuleEngine::new(),
        }
    }

    /// Settings in use.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate a request, falling back to the rule engine on any failure.
    pub async fn evaluate(&self, request: &NetworkRequest) -> EvaluationResult {
        match self.try_evaluate(request).await {
            Ok(result) => {
                tracing::debug!(
                    company = %request.company_name,
                    decision = %result.decision,
                    risk_score = result.risk_score,
                    "Model evaluation"
                );
                result
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "Model evaluation failed, falling back to rules"
                );
                self.fallback(request)
            }
        }
    }

    /// Evaluate through the model only, surfacing the failure cause.
    ///
    /// Exactly one completion call is made, bounded by the configured timeout.
    pub async fn try_evaluate(
        &self,
        request: &NetworkRequest,
    ) -> Result<EvaluationResult, EvaluatorError> {
        let messages = prompts::build_messages(request)?;
        let completion = self.config.completion_config();
        let timeout = completion.timeout;

        let response = tokio::time::timeout(timeout, self.provider.complete(messages, &completion))
            .await
            .map_err(|_| EvaluatorError::Timeout(timeout))??;

        tracing::debug!(
            model = %response.model,
            tokens = response.usage.total(),
            "Completion received"
        );

        Ok(response::parse_evaluation(&response.content)?)
    }

    fn fallback(&self, request: &NetworkRequest) -> EvaluationResult {
        EvaluationResult {
            summary: FALLBACK_SUMMARY.to_string(),
            ..self.rules.evaluate(request)
        }
    }
}
