//! Pack Assist — keyword-routed WhatsApp responder with an LLM fallback.

pub mod business;
pub mod channels;
pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod server;
