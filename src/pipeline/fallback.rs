//! Fallback delegate — answers messages no rule matched.
//!
//! The delegate never fails: any backend error is logged and replaced by a
//! fixed reply that gives the contact phone number and asks what packaging
//! the customer wants.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::business::{BusinessProfile, Catalog};
use crate::llm::provider::{ChatMessage, CompletionRequest, LlmProvider};

/// Output cap for fallback replies.
pub const DEFAULT_MAX_TOKENS: u32 = 150;

/// Produces a reply for an unmatched message.
#[async_trait]
pub trait FallbackDelegate: Send + Sync {
    /// Reply to `message` (the original, un-normalized text).
    async fn respond(&self, message: &str) -> String;
}

/// Fixed reply used whenever the generative backend is unavailable.
pub fn static_reply(profile: &BusinessProfile) -> String {
    format!(
        "I'd love to help with your packaging needs! Please contact us at {} for detailed quotes. \
         What type of packaging are you looking for? 📦",
        profile.contact_phone
    )
}

/// Delegate that always returns the static reply. Used when no backend is
/// configured.
pub struct StaticFallback {
    profile: Arc<BusinessProfile>,
}

impl StaticFallback {
    pub fn new(profile: Arc<BusinessProfile>) -> Self {
        Self { profile }
    }
}

#[async_trait]
impl FallbackDelegate for StaticFallback {
    async fn respond(&self, _message: &str) -> String {
        static_reply(&self.profile)
    }
}

/// Delegate backed by an LLM provider. One attempt per message, no retry.
pub struct LlmFallback {
    llm: Arc<dyn LlmProvider>,
    profile: Arc<BusinessProfile>,
    catalog: Arc<Catalog>,
    max_tokens: u32,
}

impl LlmFallback {
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        profile: Arc<BusinessProfile>,
        catalog: Arc<Catalog>,
    ) -> Self {
        Self {
            llm,
            profile,
            catalog,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[async_trait]
impl FallbackDelegate for LlmFallback {
    async fn respond(&self, message: &str) -> String {
        let prompt = build_prompt(&self.profile, &self.catalog, message);
        let request =
            CompletionRequest::new(vec![ChatMessage::user(prompt)]).with_max_tokens(self.max_tokens);

        match self.llm.complete(request).await {
            Ok(response) => {
                let text = response.content.trim();
                if text.is_empty() {
                    warn!(model = %self.llm.model_name(), "LLM returned empty text, using static reply");
                    return static_reply(&self.profile);
                }
                info!(
                    model = %self.llm.model_name(),
                    output_tokens = response.output_tokens,
                    "Fallback reply generated"
                );
                text.to_string()
            }
            Err(e) => {
                warn!(
                    model = %self.llm.model_name(),
                    error = %e,
                    "LLM fallback failed, using static reply"
                );
                static_reply(&self.profile)
            }
        }
    }
}

/// Build the fallback prompt. The customer message is embedded verbatim.
fn build_prompt(profile: &BusinessProfile, catalog: &Catalog, message: &str) -> String {
    let products = catalog
        .iter()
        .map(|(_, entry)| entry.display_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are a helpful customer service rep for {name}, a packaging company.\n\n\
         Our products: {products}\n\
         Business hours: {hours}\n\
         Specialties: {specialties}\n\n\
         Customer message: \"{message}\"\n\n\
         Respond as a packaging expert:\n\
         - Be friendly and professional\n\
         - Keep under 200 characters\n\
         - Ask specific questions to help with quotes\n\
         - Use appropriate emojis\n\
         - Always try to be helpful\n\n\
         Response:",
        name = profile.name,
        hours = profile.operating_hours,
        specialties = profile.specialties,
    )
}
