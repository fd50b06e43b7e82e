//! Configuration types.
//!
//! Everything comes from environment variables; `from_lookup` takes the
//! lookup as a closure so tests don't touch the process environment.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::channels::twilio::{self, TwilioConfig};
use crate::error::ConfigError;
use crate::llm::{DEFAULT_MODEL, LlmConfig};
use crate::pipeline::fallback::DEFAULT_MAX_TOKENS;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default timeout for a fallback LLM call. Together with the delivery
/// timeout this stays inside Twilio's 15 second webhook window.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 8;

/// Responder configuration.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// HTTP listen port.
    pub port: u16,
    /// LLM settings; `None` when no API key is set (static fallback only).
    pub llm: Option<LlmConfig>,
    /// Output cap for fallback replies.
    pub max_tokens: u32,
    /// Outbound messaging provider.
    pub twilio: TwilioConfig,
    /// Token the platform echoes during webhook verification.
    pub webhook_verify_token: Option<SecretString>,
    /// JSON business profile; the built-in profile is used when unset.
    pub profile_path: Option<PathBuf>,
}

impl BotConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| get(key).ok_or_else(|| ConfigError::MissingEnvVar(key.into()));

        let port = parse_or(get("PORT"), "PORT", DEFAULT_PORT)?;
        let max_tokens = parse_or(
            get("PACK_ASSIST_MAX_TOKENS"),
            "PACK_ASSIST_MAX_TOKENS",
            DEFAULT_MAX_TOKENS,
        )?;
        let timeout_secs = parse_or(
            get("PACK_ASSIST_LLM_TIMEOUT_SECS"),
            "PACK_ASSIST_LLM_TIMEOUT_SECS",
            DEFAULT_LLM_TIMEOUT_SECS,
        )?;
        let send_timeout_secs = parse_or(
            get("PACK_ASSIST_SEND_TIMEOUT_SECS"),
            "PACK_ASSIST_SEND_TIMEOUT_SECS",
            twilio::DEFAULT_SEND_TIMEOUT.as_secs(),
        )?;

        let llm = get("ANTHROPIC_API_KEY").map(|api_key| LlmConfig {
            api_key: SecretString::from(api_key),
            model: get("PACK_ASSIST_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: get("ANTHROPIC_BASE_URL"),
            timeout: Duration::from_secs(timeout_secs),
        });

        let twilio = TwilioConfig {
            account_sid: require("TWILIO_ACCOUNT_SID")?,
            auth_token: SecretString::from(require("TWILIO_AUTH_TOKEN")?),
            from_number: get("TWILIO_WHATSAPP_FROM")
                .unwrap_or_else(|| twilio::SANDBOX_FROM_NUMBER.to_string()),
            api_base: get("TWILIO_API_BASE").unwrap_or_else(|| twilio::DEFAULT_API_BASE.to_string()),
            timeout: Duration::from_secs(send_timeout_secs),
        };

        Ok(Self {
            port,
            llm,
            max_tokens,
            twilio,
            webhook_verify_token: get("WEBHOOK_VERIFY_TOKEN").map(SecretString::from),
            profile_path: get("PACK_ASSIST_PROFILE").map(PathBuf::from),
        })
    }
}

fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{raw:?}: {e}"),
        }),
        None => Ok(default),
    }
}
