use std::sync::Arc;

use clap::Parser as _;
use color_eyre::eyre::Context as _;
use sqlx::postgres::PgPoolOptions;

use matchday::{config::Config, routes, state::AppState, telemetry};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    telemetry::setup_tracing()?;

    let config = Config::parse();
    let port = config.port;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .wrap_err("Failed to connect to Postgres")?;

    tracing::info!("Connected to database");

    let state = AppState {
        db: pool,
        config: Arc::new(config),
    };
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .wrap_err_with(|| format!("Failed to bind port {port}"))?;

    tracing::info!(port, "Stats server listening");

    axum::serve(listener, app)
        .await
        .wrap_err("Server exited with error")?;

    Ok(())
}
