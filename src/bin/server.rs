//! HTTP server: reads configuration from the environment (and `.env`), connects
//! the pool, optionally creates missing tables, then serves the API.

use laris_assistant::{app, apply_migrations, AppConfig, AppState, PgDatabase};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("laris_assistant=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    let db = Arc::new(PgDatabase::new(pool));

    if config.run_migrations {
        apply_migrations(db.as_ref()).await?;
    }

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(db, config);
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
