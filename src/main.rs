use std::sync::Arc;

use pack_assist::business::BusinessData;
use pack_assist::channels::{MessageSender, TwilioWhatsApp};
use pack_assist::config::BotConfig;
use pack_assist::llm::create_provider;
use pack_assist::pipeline::{Dispatcher, FallbackDelegate, LlmFallback, RuleTable, StaticFallback};
use pack_assist::server::{AppState, webhook_routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = BotConfig::from_env()?;

    // ── Business data ────────────────────────────────────────────────────
    let business = match &config.profile_path {
        Some(path) => BusinessData::load(path)?,
        None => BusinessData::packaging(),
    };
    let profile = Arc::new(business.profile);
    let catalog = Arc::new(business.catalog);

    // ── Fallback ─────────────────────────────────────────────────────────
    let fallback: Arc<dyn FallbackDelegate> = match &config.llm {
        Some(llm_config) => {
            let llm = create_provider(llm_config)?;
            Arc::new(
                LlmFallback::new(llm, Arc::clone(&profile), Arc::clone(&catalog))
                    .with_max_tokens(config.max_tokens),
            )
        }
        None => {
            tracing::warn!("ANTHROPIC_API_KEY not set, unmatched messages get the static reply");
            Arc::new(StaticFallback::new(Arc::clone(&profile)))
        }
    };

    let rules = RuleTable::for_business(Arc::clone(&profile), Arc::clone(&catalog));
    tracing::info!(rules = rules.len(), products = catalog.len(), "Rule table built");
    let dispatcher = Arc::new(Dispatcher::new(rules, fallback));

    let sender: Arc<dyn MessageSender> = Arc::new(TwilioWhatsApp::new(config.twilio.clone())?);

    let app = webhook_routes(AppState {
        dispatcher,
        sender,
        profile: Arc::clone(&profile),
        verify_token: config.webhook_verify_token.clone(),
    });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(
        port = config.port,
        business = %profile.name,
        "WhatsApp responder listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
