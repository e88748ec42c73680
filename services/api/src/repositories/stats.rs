//! Back-office dashboard counters

use anyhow::Result;
use common::models::DashboardStats;
use sqlx::SqlitePool;

/// Read-only aggregate queries for the back office
#[derive(Clone)]
pub struct StatsRepository {
    pool: SqlitePool,
}

impl StatsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn dashboard(&self) -> Result<DashboardStats> {
        let stats = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM cars) AS total_cars,
                (SELECT COUNT(*) FROM cars WHERE status = 'available') AS available_cars,
                (SELECT COUNT(*) FROM sales) AS total_sales,
                (SELECT COALESCE(SUM(price), 0) FROM sales) AS revenue,
                (SELECT COUNT(*) FROM sell_requests WHERE status = 'pending') AS pending_sell_requests,
                (SELECT COUNT(*) FROM service_bookings WHERE status = 'scheduled') AS scheduled_services,
                (SELECT COUNT(*) FROM contacts) AS contacts
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
