//! Outbound delivery over the messaging channel.

pub mod twilio;

pub use twilio::{TwilioConfig, TwilioWhatsApp, strip_whatsapp_prefix};

use async_trait::async_trait;

use crate::error::ChannelError;

/// Delivers a reply to a customer.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Channel name for logging.
    fn name(&self) -> &str;

    /// Send `body` to the customer at `to` (a bare phone number).
    async fn send(&self, to: &str, body: &str) -> Result<(), ChannelError>;
}
