use anyhow::Context;
use clap::Parser;
use jaya_core::config::RelayConfig;
use jaya_core::decoder::DecoderRegistry;
use jaya_core::notify::SlackNotifier;
use jaya_core::webhook::{HubSignatureVerifier, WebhookSecret};
use jaya_server::cli::{Cli, Commands};
use jaya_server::worker::{SHUTDOWN_DRAIN_TIMEOUT, drain_notify_processor};
use jaya_server::{AppState, routes, start_notify_processor};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (doesn't override existing env vars)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jaya_server=debug,jaya_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or_default() {
        Commands::Run => run_server(SocketAddr::new(cli.host, cli.port)).await,
        Commands::Sign { file, secret } => sign_payload(&file, secret),
        Commands::EventTypes => {
            for event_type in DecoderRegistry::with_defaults().event_types() {
                println!("{}", event_type);
            }
            Ok(())
        }
    }
}

async fn run_server(addr: SocketAddr) -> anyhow::Result<()> {
    let config = RelayConfig::from_env()?;

    let notifier = SlackNotifier::new(config.chat_webhook_url.clone(), config.notify_timeout)?;
    let (notify_tx, notify_handle) = start_notify_processor(Arc::new(notifier));

    let registry = DecoderRegistry::with_defaults();
    tracing::info!("Registered event types: {:?}", registry.event_types());

    let state = AppState::new(config, registry, notify_tx);
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Jaya relay listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and with it every notify sender) is gone; drain the queue.
    drain_notify_processor(notify_handle, SHUTDOWN_DRAIN_TIMEOUT).await;

    Ok(())
}

fn sign_payload(file: &Path, secret: String) -> anyhow::Result<()> {
    let body = std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let secret = WebhookSecret::new(secret)?;

    println!("{}", HubSignatureVerifier::new(&secret).sign(&body));
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
