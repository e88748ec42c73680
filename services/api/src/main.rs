use std::time::Duration;

use anyhow::Result;
use api::{AppState, config::ServerConfig, prepare_database};
use common::database::{DatabaseConfig, health_check, init_pool};
use tokio::net::TcpListener;
use tracing::{error, info};

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[tokio::main]
async fn main() -> Result<()> {
    common::telemetry::init_tracing("info")?;

    info!("Starting showroom API");

    let config = ServerConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    prepare_database(&pool, &config).await?;

    let state = AppState::new(pool, config.clone());
    spawn_session_sweeper(state.clone());

    let app = api::app(state);

    let listener = TcpListener::bind(&config.bind_address).await?;
    info!("Showroom API listening on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically drop expired customer and employee sessions
fn spawn_session_sweeper(state: AppState) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            for sessions in [&state.customer_sessions, &state.employee_sessions] {
                match sessions.delete_expired().await {
                    Ok(0) => {}
                    Ok(removed) => info!("Removed {} expired sessions", removed),
                    Err(e) => error!("Session cleanup failed: {:?}", e),
                }
            }
        }
    });
}
