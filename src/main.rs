//! Server entrypoint

use anyhow::{Context, Result};
use email_harvest::server::{build_app, AppState};
use email_harvest::{Config, HistoryStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,email_harvest=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let store = HistoryStore::open(config.output_dir.clone())
        .await
        .context("Failed to open history store")?;
    tracing::info!(output_dir = %config.output_dir.display(), "History store ready");

    let app = build_app(AppState { store }, config.max_upload_bytes);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting email-harvest on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
