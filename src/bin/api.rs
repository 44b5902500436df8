use acrescimos::{app_state::AppState, config::Config, routes, telemetry};
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing("info,tower_http=debug");

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(config.database_url())
        .await
        .context("Failed to connect to database")?;

    // runs all pending migrations; no-op if up-to-date
    sqlx::migrate!("./migrations").run(&pool).await?;

    let state = AppState::new(pool, &config)?;
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr()))?;
    info!(addr = %config.bind_addr(), source = %config.source_url(), "api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
