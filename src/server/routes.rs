//! Webhook and health endpoints.

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Query, State, rejection::FormRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::business::BusinessProfile;
use crate::channels::{MessageSender, strip_whatsapp_prefix};
use crate::pipeline::{Dispatcher, InboundMessage};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub sender: Arc<dyn MessageSender>,
    pub profile: Arc<BusinessProfile>,
    /// Verification token for the webhook handshake (None disables it).
    pub verify_token: Option<SecretString>,
}

/// Build the Axum router with webhook and health routes.
pub fn webhook_routes(state: AppState) -> Router {
    Router::new()
        .route("/webhook", get(verify_webhook).post(receive_message))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "✅ Bot running!",
        "business": state.profile.name,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

// ── Verification handshake ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct VerifyParams {
    #[serde(rename = "hub.mode")]
    mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    challenge: Option<String>,
}

async fn verify_webhook(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> impl IntoResponse {
    let token_ok = match (&state.verify_token, &params.verify_token) {
        (Some(expected), Some(given)) => expected.expose_secret() == given.as_str(),
        _ => false,
    };

    if params.mode.as_deref() == Some("subscribe") && token_ok {
        info!("Webhook verified");
        (StatusCode::OK, params.challenge.unwrap_or_default())
    } else {
        warn!(mode = ?params.mode, "Webhook verification rejected");
        (StatusCode::FORBIDDEN, String::new())
    }
}

// ── Inbound messages ────────────────────────────────────────────────────

/// Twilio's inbound message form. Missing fields count as empty.
#[derive(Debug, Default, Deserialize)]
struct WebhookForm {
    #[serde(rename = "Body", default)]
    body: String,
    #[serde(rename = "From", default)]
    from: String,
    #[serde(rename = "MessageSid", default)]
    message_sid: Option<String>,
}

/// Always acknowledges with 200: classification and delivery failures are
/// logged here and never reported back to the transport.
async fn receive_message(
    State(state): State<AppState>,
    form: Result<Form<WebhookForm>, FormRejection>,
) -> StatusCode {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!(error = %rejection, "Unreadable webhook payload, treating as empty");
            WebhookForm::default()
        }
    };

    let sender = strip_whatsapp_prefix(&form.from).to_string();
    let mut message = InboundMessage::new(sender, form.body);
    if let Some(sid) = form.message_sid {
        message = message.with_id(sid);
    }

    info!(
        id = %message.id,
        from = %message.sender,
        text = %message.raw_text,
        "Inbound message"
    );

    let Some(reply) = state.dispatcher.respond(&message).await else {
        return StatusCode::OK;
    };

    info!(id = %message.id, source = reply.label(), "Reply selected");

    if let Err(e) = state.sender.send(&message.sender, &reply.text).await {
        error!(
            id = %message.id,
            channel = state.sender.name(),
            error = %e,
            "Failed to deliver reply"
        );
    }

    StatusCode::OK
}
