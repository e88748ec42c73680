//! Application state shared across handlers

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::{
    config::ServerConfig,
    rate_limiter::RateLimiter,
    repositories::{
        CarRepository, CartRepository, CustomerRepository, EmployeeRepository,
        InquiryRepository, SaleRepository, SessionKind, SessionRepository, SettingsRepository,
        StatsRepository,
    },
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub config: Arc<ServerConfig>,
    pub car_repository: CarRepository,
    pub cart_repository: CartRepository,
    pub customer_repository: CustomerRepository,
    pub employee_repository: EmployeeRepository,
    pub inquiry_repository: InquiryRepository,
    pub sale_repository: SaleRepository,
    pub settings_repository: SettingsRepository,
    pub stats_repository: StatsRepository,
    pub customer_sessions: SessionRepository,
    pub employee_sessions: SessionRepository,
    pub login_limiter: RateLimiter,
}

impl AppState {
    /// Wire every repository to one pool
    pub fn new(pool: SqlitePool, config: ServerConfig) -> Self {
        Self {
            car_repository: CarRepository::new(pool.clone()),
            cart_repository: CartRepository::new(pool.clone()),
            customer_repository: CustomerRepository::new(pool.clone()),
            employee_repository: EmployeeRepository::new(pool.clone()),
            inquiry_repository: InquiryRepository::new(pool.clone()),
            sale_repository: SaleRepository::new(pool.clone()),
            settings_repository: SettingsRepository::new(pool.clone()),
            stats_repository: StatsRepository::new(pool.clone()),
            customer_sessions: SessionRepository::new(
                pool.clone(),
                SessionKind::Customer,
                config.session_ttl_hours,
            ),
            employee_sessions: SessionRepository::new(
                pool.clone(),
                SessionKind::Employee,
                config.employee_session_ttl_hours,
            ),
            login_limiter: RateLimiter::new(config.login_rate_limit()),
            config: Arc::new(config),
            db_pool: pool,
        }
    }
}
