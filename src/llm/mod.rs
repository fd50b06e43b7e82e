//! LLM integration for Pack Assist.
//!
//! The only consumer is the fallback delegate; the provider trait keeps the
//! pipeline free of any particular backend.

pub mod anthropic;
pub mod provider;

pub use anthropic::AnthropicProvider;
pub use provider::*;

use std::sync::Arc;
use std::time::Duration;

use crate::error::LlmError;

/// Default model for fallback replies.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Configuration for creating an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: secrecy::SecretString,
    pub model: String,
    /// Override for the API base URL.
    pub base_url: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Create an LLM provider from configuration.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    let provider = match &config.base_url {
        Some(base) => AnthropicProvider::with_base_url(
            config.api_key.clone(),
            &config.model,
            base,
            config.timeout,
        )?,
        None => AnthropicProvider::new(config.api_key.clone(), &config.model, config.timeout)?,
    };

    tracing::info!(model = %config.model, "Using Anthropic");
    Ok(Arc::new(provider))
}
