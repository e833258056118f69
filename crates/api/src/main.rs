use anyhow::{Context, Result};
use campus_api::{build_app_with_config, ApiConfig};
use campus_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("campus_api");

    let config = ApiConfig::from_env().context("invalid CAMPUS_* configuration")?;
    let app = build_app_with_config(&config);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!(
        bind = %config.bind,
        match_mode = ?config.match_mode,
        delay_min_ms = config.pacing.min_ms(),
        delay_max_ms = config.pacing.max_ms(),
        "campus assistant api started"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
