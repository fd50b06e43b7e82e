//! Classifier/dispatcher — turns one inbound message into one reply.
//!
//! Flow:
//! 1. Normalize (lowercase; surrounding whitespace is kept so a trailing
//!    "hi " still reads as a greeting)
//! 2. Walk the rule table in order; the first match answers
//! 3. Otherwise hand the original text to the fallback delegate
//!
//! Dispatch holds no mutable state, so any number of messages can be
//! dispatched concurrently against the same `Dispatcher`.

use std::sync::Arc;

use tracing::{debug, info};

use crate::pipeline::fallback::FallbackDelegate;
use crate::pipeline::rules::{Intent, RuleTable};
use crate::pipeline::types::{InboundMessage, Reply, ReplySource};

/// Outcome of running the rule table alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Matched { intent: Intent, reply: String },
    Unmatched,
}

/// Normalize message text for rule matching. Whitespace is left in place;
/// whole-message keywords trim for themselves.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
}

pub struct Dispatcher {
    rules: RuleTable,
    fallback: Arc<dyn FallbackDelegate>,
}

impl Dispatcher {
    pub fn new(rules: RuleTable, fallback: Arc<dyn FallbackDelegate>) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Evaluate the rule table only. Pure; never calls the fallback.
    pub fn classify(&self, text: &str) -> Classification {
        let normalized = normalize(text);
        match self.rules.first_match(&normalized) {
            Some(rule) => Classification::Matched {
                intent: rule.intent(),
                reply: rule.respond(),
            },
            None => Classification::Unmatched,
        }
    }

    /// Produce exactly one reply. Unmatched messages go to the fallback
    /// delegate with their original text; its call is awaited before
    /// returning.
    pub async fn dispatch(&self, message: &InboundMessage) -> Reply {
        match self.classify(&message.raw_text) {
            Classification::Matched { intent, reply } => {
                debug!(
                    id = %message.id,
                    intent = intent.label(),
                    "Rule matched"
                );
                Reply {
                    text: reply,
                    source: ReplySource::Rule(intent),
                }
            }
            Classification::Unmatched => {
                info!(id = %message.id, "No rule matched, using fallback");
                Reply {
                    text: self.fallback.respond(&message.raw_text).await,
                    source: ReplySource::Fallback,
                }
            }
        }
    }

    /// Caller-side entry point: blank messages are skipped without touching
    /// the rule table or the fallback.
    pub async fn respond(&self, message: &InboundMessage) -> Option<Reply> {
        if message.is_blank() {
            debug!(id = %message.id, "Blank message, skipping dispatch");
            return None;
        }
        Some(self.dispatch(message).await)
    }
}
