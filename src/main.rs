use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;
use whisperline::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let app = whisperline::app(AppState::new());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "relay listening");

    axum::serve(listener, app).await?;
    Ok(())
}
