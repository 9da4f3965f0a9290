//! Folio chat API server binary.
//!
//! Prints `{"port": N}` to stdout once bound so a parent process can
//! discover an ephemeral port.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use folio_core::chat::exchange::ChatService;
use folio_core::persona::Persona;
use folio_core::provider::config::ProviderConfig;
use folio_core::provider::groq::GroqProvider;
use tracing::{info, warn};

/// CLI arguments for the chat server.
#[derive(Parser, Debug)]
#[command(name = "folio_server", about = "Folio chat API server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3100")]
    bind: String,

    /// YAML file overriding the built-in persona.
    #[arg(long, env = "FOLIO_PERSONA")]
    persona: Option<PathBuf>,

    /// Timeout for each provider call in seconds (default: wait indefinitely).
    #[arg(long, env = "FOLIO_PROVIDER_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Write logs to stderr so stdout is reserved for the JSON port message.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,folio_api=debug,folio_core=debug"))?,
        )
        .init();

    let args = Args::parse();

    let persona = Persona::load_or_default(args.persona.as_deref())?;
    let provider_config = ProviderConfig {
        timeout_secs: args.timeout_secs,
        ..ProviderConfig::from_env()
    };
    let provider = GroqProvider::new(&provider_config)?;

    info!(
        persona = %persona.name,
        endpoint = %provider.endpoint(),
        model = %provider_config.model,
        "starting folio_server"
    );

    let chat = ChatService::new(
        persona,
        provider_config.clone(),
        provider_config.key_source(),
        Arc::new(provider),
    );
    if !chat.provider_configured() {
        warn!(
            var = %provider_config.api_key_env,
            "no provider credential set, chat will answer with the fallback reply"
        );
    }

    let config = folio_api::config::ApiConfig { bind_addr: args.bind };
    let state = folio_api::AppState {
        chat,
        config: config.clone(),
    };
    let app = folio_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    println!("{}", serde_json::json!({"port": local_addr.port()}));
    info!(addr = %local_addr, "chat API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
