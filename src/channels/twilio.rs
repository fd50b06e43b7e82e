//! WhatsApp delivery through the Twilio Messages API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::info;

use crate::channels::MessageSender;
use crate::error::ChannelError;

/// Default Twilio REST API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.twilio.com";

/// Twilio's WhatsApp sandbox number.
pub const SANDBOX_FROM_NUMBER: &str = "+14155238886";

/// Default per-request timeout for message delivery.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum body length Twilio accepts for one WhatsApp message (characters).
const WHATSAPP_MAX_MESSAGE_LENGTH: usize = 1600;

const CHANNEL: &str = "whatsapp";

/// Twilio account settings.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: SecretString,
    /// Business number messages are sent from (without `whatsapp:` prefix).
    pub from_number: String,
    pub api_base: String,
    /// Per-request timeout. The webhook awaits delivery before acking.
    pub timeout: Duration,
}

/// Twilio-backed WhatsApp sender.
pub struct TwilioWhatsApp {
    config: TwilioConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    #[serde(default)]
    code: Option<u32>,
    #[serde(default)]
    message: String,
}

impl TwilioWhatsApp {
    pub fn new(config: TwilioConfig) -> Result<Self, ChannelError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChannelError::SendFailed {
                name: CHANNEL.into(),
                reason: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    async fn send_chunk(&self, to: &str, body: &str) -> Result<String, ChannelError> {
        let from = whatsapp_address(&self.config.from_number);
        let to = whatsapp_address(to);
        let params = [("From", from.as_str()), ("To", to.as_str()), ("Body", body)];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(
                &self.config.account_sid,
                Some(self.config.auth_token.expose_secret()),
            )
            .form(&params)
            .send()
            .await
            .map_err(|e| ChannelError::SendFailed {
                name: CHANNEL.into(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ChannelError::AuthFailed {
                name: CHANNEL.into(),
                reason: "Twilio rejected account credentials".into(),
            });
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let reason = match serde_json::from_str::<TwilioErrorBody>(&text) {
                Ok(err) => match err.code {
                    Some(code) => format!("HTTP {status} (code {code}): {}", err.message),
                    None => format!("HTTP {status}: {}", err.message),
                },
                Err(_) => format!("HTTP {status}: {text}"),
            };
            return Err(ChannelError::SendFailed {
                name: CHANNEL.into(),
                reason,
            });
        }

        let resource: MessageResource =
            response
                .json()
                .await
                .map_err(|e| ChannelError::InvalidResponse {
                    name: CHANNEL.into(),
                    reason: e.to_string(),
                })?;

        info!(
            sid = %resource.sid,
            status = resource.status.as_deref().unwrap_or("unknown"),
            "WhatsApp message sent"
        );
        Ok(resource.sid)
    }
}

#[async_trait]
impl MessageSender for TwilioWhatsApp {
    fn name(&self) -> &str {
        CHANNEL
    }

    async fn send(&self, to: &str, body: &str) -> Result<(), ChannelError> {
        for chunk in split_message(body, WHATSAPP_MAX_MESSAGE_LENGTH) {
            self.send_chunk(to, &chunk).await?;
        }
        Ok(())
    }
}

/// Remove the `whatsapp:` channel prefix Twilio puts on addresses.
pub fn strip_whatsapp_prefix(address: &str) -> &str {
    address.strip_prefix("whatsapp:").unwrap_or(address)
}

fn whatsapp_address(number: &str) -> String {
    format!("whatsapp:{}", strip_whatsapp_prefix(number))
}

/// Split `text` into chunks of at most `max_chars` characters, preferring
/// newline then space boundaries.
fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        // Byte offset just past the `max_chars`-th character.
        let limit = match remaining.char_indices().nth(max_chars) {
            Some((idx, _)) => idx,
            None => {
                chunks.push(remaining.to_string());
                break;
            }
        };

        let window = &remaining[..limit];
        let split_at = window
            .rfind('\n')
            .or_else(|| window.rfind(' '))
            .filter(|&idx| idx > 0)
            .unwrap_or(limit);

        chunks.push(remaining[..split_at].to_string());
        remaining = remaining[split_at..].trim_start();
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sender_with_timeout(server: &MockServer, timeout: Duration) -> TwilioWhatsApp {
        TwilioWhatsApp::new(TwilioConfig {
            account_sid: "AC123".into(),
            auth_token: SecretString::from("token"),
            from_number: SANDBOX_FROM_NUMBER.into(),
            api_base: server.uri(),
            timeout,
        })
        .unwrap()
    }

    fn sender(server: &MockServer) -> TwilioWhatsApp {
        sender_with_timeout(server, DEFAULT_SEND_TIMEOUT)
    }

    #[test]
    fn strips_prefix() {
        assert_eq!(strip_whatsapp_prefix("whatsapp:+15551234"), "+15551234");
        assert_eq!(strip_whatsapp_prefix("+15551234"), "+15551234");
        assert_eq!(whatsapp_address("whatsapp:+1"), "whatsapp:+1");
    }

    #[test]
    fn split_message_short() {
        assert_eq!(split_message("Hello", 1600), vec!["Hello"]);
    }

    #[test]
    fn split_message_exact_limit() {
        let msg = "a".repeat(1600);
        let chunks = split_message(&msg, 1600);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn split_message_on_newline() {
        let msg = format!("{}\n{}", "a".repeat(1000), "b".repeat(1000));
        let chunks = split_message(&msg, 1600);
        assert_eq!(chunks, vec!["a".repeat(1000), "b".repeat(1000)]);
    }

    #[test]
    fn split_message_no_good_split_point() {
        let msg = "a".repeat(2000);
        let chunks = split_message(&msg, 1600);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 1600);
        assert_eq!(chunks[1].len(), 400);
    }

    #[test]
    fn split_message_respects_multibyte_chars() {
        let msg = "📦".repeat(5);
        let chunks = split_message(&msg, 2);
        assert_eq!(chunks, vec!["📦📦", "📦📦", "📦"]);
    }

    #[tokio::test]
    async fn send_posts_form_to_messages_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC123/Messages.json"))
            .and(header_exists("authorization"))
            .and(body_string_contains("To=whatsapp%3A%2B15550001"))
            .and(body_string_contains("From=whatsapp%3A%2B14155238886"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "sid": "SM0001",
                "status": "queued"
            })))
            .expect(1)
            .mount(&server)
            .await;

        sender(&server).send("+15550001", "Hello!").await.unwrap();
    }

    #[tokio::test]
    async fn send_splits_long_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"sid": "SM1"})))
            .expect(2)
            .mount(&server)
            .await;

        let body = format!("{} {}", "a".repeat(1500), "b".repeat(500));
        sender(&server).send("+1", &body).await.unwrap();
    }

    #[tokio::test]
    async fn unauthorized_is_auth_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = sender(&server).send("+1", "hi").await.unwrap_err();
        assert!(matches!(err, ChannelError::AuthFailed { .. }));
    }

    #[tokio::test]
    async fn api_error_reports_twilio_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "code": 21211,
                "message": "Invalid 'To' Phone Number",
                "status": 400
            })))
            .mount(&server)
            .await;

        let err = sender(&server).send("bogus", "hi").await.unwrap_err();
        match err {
            ChannelError::SendFailed { reason, .. } => {
                assert!(reason.contains("21211"), "unexpected reason: {reason}");
            }
            other => panic!("Expected SendFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn hung_provider_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"sid": "SM1"}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let err = sender_with_timeout(&server, Duration::from_millis(100))
            .send("+1", "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, ChannelError::SendFailed { .. }));
    }
}
