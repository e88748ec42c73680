//! Showroom API: the REST backend of the storefront and the back office

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod rate_limiter;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

use anyhow::Result;
use axum::Router;
use sqlx::SqlitePool;
use tracing::info;

use crate::config::ServerConfig;
pub use crate::state::AppState;

/// Bring a pool up to date: schema, sample inventory and the admin account
pub async fn prepare_database(pool: &SqlitePool, config: &ServerConfig) -> Result<()> {
    common::database::migrate(pool).await?;

    let state = AppState::new(pool.clone(), config.clone());
    let seeded = state.car_repository.seed_if_empty().await?;
    if seeded > 0 {
        info!("Seeded {} sample cars", seeded);
    }
    if state.employee_repository.ensure_admin(&config.admin_password).await? {
        info!("Created default admin account");
    }

    Ok(())
}

/// Build the application router over `state`
pub fn app(state: AppState) -> Router {
    routes::create_router(state)
}
