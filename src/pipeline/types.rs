//! Shared types for the message pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pipeline::rules::Intent;

// ── Inbound message ─────────────────────────────────────────────────

/// A customer message handed to the dispatcher by the webhook.
///
/// Transient: one per dispatch, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Provider message id, or a generated UUID when the provider sent none.
    pub id: String,
    /// Sender phone number with any channel prefix removed.
    pub sender: String,
    /// Message body exactly as received.
    pub raw_text: String,
    pub received_at: DateTime<Utc>,
}

impl InboundMessage {
    pub fn new(sender: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender: sender.into(),
            raw_text: raw_text.into(),
            received_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// True when there is nothing worth classifying.
    pub fn is_blank(&self) -> bool {
        self.raw_text.trim().is_empty()
    }
}

// ── Reply ───────────────────────────────────────────────────────────

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "intent", rename_all = "snake_case")]
pub enum ReplySource {
    /// A rule in the table matched.
    Rule(Intent),
    /// No rule matched; the fallback delegate answered.
    Fallback,
}

/// The single reply produced for an inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

impl Reply {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self.source {
            ReplySource::Rule(intent) => intent.label(),
            ReplySource::Fallback => "fallback",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection_ignores_whitespace() {
        assert!(InboundMessage::new("+1", "").is_blank());
        assert!(InboundMessage::new("+1", " \n\t ").is_blank());
        assert!(!InboundMessage::new("+1", " hi ").is_blank());
    }

    #[test]
    fn new_messages_get_unique_ids() {
        let a = InboundMessage::new("+1", "hello");
        let b = InboundMessage::new("+1", "hello");
        assert_ne!(a.id, b.id);
        assert_eq!(a.clone().with_id("SM123").id, "SM123");
    }

    #[test]
    fn reply_label_names_source() {
        let rule = Reply {
            text: "x".into(),
            source: ReplySource::Rule(Intent::Hours),
        };
        let fallback = Reply {
            text: "y".into(),
            source: ReplySource::Fallback,
        };
        assert_eq!(rule.label(), "hours");
        assert_eq!(fallback.label(), "fallback");
    }
}
