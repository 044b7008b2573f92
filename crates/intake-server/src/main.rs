use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intake_runtime::{LlmEvaluator, ProviderRegistry};
use intake_server::{build_router, AppState, Args, Config, JsonFileStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before flags so env fallbacks see it
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,intake_server=debug,intake_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let config = Config::from_args(Args::parse())?;

    let provider = ProviderRegistry::with_defaults()
        .create(&config.evaluator.provider, &config.provider_config())
        .context("failed to create completion provider")?;

    if !provider.health_check().await {
        anyhow::bail!("completion provider '{}' is not usable", provider.name());
    }

    tracing::info!(
        provider = provider.name(),
        model = %config.evaluator.model,
        timeout = ?config.evaluator.timeout,
        "Evaluator ready"
    );

    let evaluator = LlmEvaluator::new(provider, config.evaluator.clone());

    let store = JsonFileStore::open(&config.data_dir)
        .await
        .with_context(|| format!("failed to open data directory {}", config.data_dir.display()))?;

    let app = build_router(AppState::new(Arc::new(store), Arc::new(evaluator)));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!(addr = %config.bind, "Listening");
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
