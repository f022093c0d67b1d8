use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use concierge::api::{create_router, AppState};
use concierge::config::Config;
use concierge::faq::FaqCatalog;
use concierge::llm::{ConversationBackend, LlmProvider};
use concierge::speech;

#[derive(Parser)]
#[command(name = "concierge")]
#[command(about = "FAQ-first support assistant with LLM fallback")]
struct Args {
    /// Path to a FAQ catalog JSON file overriding the bundled catalog
    #[arg(long)]
    catalog: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "concierge=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let catalog_path = args.catalog.or_else(|| config.faq.catalog_path.clone());
    let catalog = match &catalog_path {
        Some(path) => {
            tracing::info!("Loading FAQ catalog from {}...", path);
            FaqCatalog::from_path(path)?
        }
        None => FaqCatalog::bundled()?,
    };
    tracing::info!("FAQ catalog loaded: {} entries", catalog.len());

    if let Some(llm_config) = &config.llm {
        tracing::info!("Initializing LLM provider: {}...", llm_config.model);
    }
    let llm = LlmProvider::new(config.llm.as_ref());
    if !llm.is_available() {
        tracing::warn!(
            "LLM unavailable - unmatched questions will get the unconfigured-backend reply"
        );
    }

    let speech = speech::from_config(&config.speech);

    let config = Arc::new(config);
    let state = AppState::new(config.clone(), Arc::new(catalog), llm, speech);

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Concierge starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
