//! # intake-runtime
//!
//! Model-assisted evaluation for onboarding requests.
//!
//! This crate sends a request to a chat-completion service, interprets the
//! reply, and falls back to the deterministic rule engine in `intake-core`
//! whenever the model path fails.
//!
//! ## Important
//!
//! Evaluation through this crate never returns an error. A result produced
//! by the fallback is marked by its summary
//! ([`FALLBACK_SUMMARY`](evaluator::FALLBACK_SUMMARY)); the failure itself is
//! only logged.
//!
//! ## Example
//!
//! ```rust,ignore
//! use intake_runtime::{EvaluatorConfig, LlmEvaluator, ProviderRegistry};
//!
//! let config = EvaluatorConfig::from_yaml_file("intake.yaml")?;
//! let provider = ProviderRegistry::with_defaults()
//!     .create(&config.provider, &serde_json::json!({}))?;
//!
//! let evaluator = LlmEvaluator::new(provider, config);
//! let result = evaluator.evaluate(&request).await;
//! ```

pub mod config;
pub mod evaluator;
pub mod prompts;
pub mod providers;
pub mod response;

pub use config::{ConfigError, EvaluatorConfig};
pub use evaluator::{EvaluatorError, LlmEvaluator, FALLBACK_SUMMARY};
pub use providers::{
    ApiCredential, ChatMessage, CompletionConfig, CompletionResponse, CredentialSource,
    LlmProvider, ProviderError, ProviderFactory, ProviderRegistry, TokenUsage,
};
pub use response::{parse_evaluation, strip_code_fence, ResponseError};

#[cfg(feature = "openai")]
pub use providers::{OpenAiProvider, OpenAiProviderFactory, OPENAI_API_KEY_ENV};
