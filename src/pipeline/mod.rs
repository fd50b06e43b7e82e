//! Intent classification and reply selection.
//!
//! Every inbound message flows through:
//! 1. `RuleTable` — ordered keyword rules with canned replies (no LLM)
//! 2. `FallbackDelegate` — generative reply, only when no rule matched
//!
//! The dispatcher returns the reply text; delivery belongs to the caller.

pub mod classifier;
pub mod fallback;
pub mod replies;
pub mod rules;
pub mod types;

pub use classifier::{Classification, Dispatcher};
pub use fallback::{FallbackDelegate, LlmFallback, StaticFallback};
pub use rules::{Intent, Rule, RuleTable};
pub use types::{InboundMessage, Reply, ReplySource};
