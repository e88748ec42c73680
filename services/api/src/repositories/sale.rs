//! Sales (orders) repository

use anyhow::Result;
use common::models::{OrderRecord, SaleRecord};
use sqlx::SqlitePool;

const CAR_NAME: &str = "CASE WHEN c.id IS NULL THEN 'Unknown' \
                        ELSE TRIM(COALESCE(c.make, '') || ' ' || COALESCE(c.model, '')) END";

/// Sales repository for database operations
#[derive(Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Create a new sales repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Orders placed by one customer, newest first
    pub async fn orders_for(&self, phone: &str) -> Result<Vec<OrderRecord>> {
        let orders = sqlx::query_as(&format!(
            r#"
            SELECT s.order_id, s.car_id, {CAR_NAME} AS car_name, c.year AS year, s.price,
                   s.created_at
            FROM sales s
            LEFT JOIN cars c ON c.id = s.car_id
            WHERE s.phone = ?
            ORDER BY s.created_at DESC
            "#
        ))
        .bind(phone)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Every order, newest first
    pub async fn all(&self) -> Result<Vec<SaleRecord>> {
        let sales = sqlx::query_as(&format!(
            r#"
            SELECT s.order_id, s.car_id, {CAR_NAME} AS car_name, s.phone, s.price, s.created_at
            FROM sales s
            LEFT JOIN cars c ON c.id = s.car_id
            ORDER BY s.created_at DESC
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }
}
