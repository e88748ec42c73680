//! Customer cart repository, including checkout

use anyhow::Result;
use chrono::Utc;
use common::models::CarRecord;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

/// What a checkout attempt did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// One order per car was recorded and the cart emptied
    Completed { order_ids: Vec<String>, total: i64 },
    /// Nothing to check out
    EmptyCart,
    /// A car in the cart was sold or withdrawn meanwhile; nothing was recorded
    Unavailable(String),
}

/// Cart repository for database operations.
///
/// Carts belong to the customer (phone), not to a login session.
#[derive(Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Create a new cart repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Cars currently in the customer's cart, oldest first
    pub async fn items(&self, phone: &str) -> Result<Vec<CarRecord>> {
        let cars = sqlx::query_as(
            r#"
            SELECT c.id, c.make, c.model, c.year, c.price, c.mileage, c.fuel, c.transmission,
                   c.owner, c.car_type, c.image, c.description, c.status
            FROM cart_items ci
            JOIN cars c ON c.id = ci.car_id
            WHERE ci.phone = ?
            ORDER BY ci.rowid
            "#,
        )
        .bind(phone)
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }

    /// Put a car in the cart; adding it twice is a no-op
    pub async fn add(&self, phone: &str, car_id: &str) -> Result<bool> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO cart_items (phone, car_id, added_at) VALUES (?, ?, ?)",
        )
        .bind(phone)
        .bind(car_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Take a car out of the cart
    pub async fn remove(&self, phone: &str, car_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cart_items WHERE phone = ? AND car_id = ?")
            .bind(phone)
            .bind(car_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Turn the whole cart into orders in one transaction.
    ///
    /// Each car is sold at its current price and marked `sold`.
    pub async fn checkout(&self, phone: &str) -> Result<CheckoutOutcome> {
        let mut tx = self.pool.begin().await?;

        let cars: Vec<CarRecord> = sqlx::query_as(
            r#"
            SELECT c.id, c.make, c.model, c.year, c.price, c.mileage, c.fuel, c.transmission,
                   c.owner, c.car_type, c.image, c.description, c.status
            FROM cart_items ci
            JOIN cars c ON c.id = ci.car_id
            WHERE ci.phone = ?
            ORDER BY ci.rowid
            "#,
        )
        .bind(phone)
        .fetch_all(&mut *tx)
        .await?;

        if cars.is_empty() {
            return Ok(CheckoutOutcome::EmptyCart);
        }

        if let Some(car) = cars.iter().find(|car| !car.is_available()) {
            let name = car.display_name();
            return Ok(CheckoutOutcome::Unavailable(if name.is_empty() {
                car.id.clone()
            } else {
                name
            }));
        }

        let now = Utc::now();
        let mut order_ids = Vec::with_capacity(cars.len());
        let mut total = 0;

        for car in &cars {
            let order_id = Uuid::new_v4().to_string();
            let price = car.price.unwrap_or(0);

            sqlx::query(
                "INSERT INTO sales (order_id, phone, car_id, price, created_at) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&order_id)
            .bind(phone)
            .bind(&car.id)
            .bind(price)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            sqlx::query("UPDATE cars SET status = 'sold' WHERE id = ?")
                .bind(&car.id)
                .execute(&mut *tx)
                .await?;

            total += price;
            order_ids.push(order_id);
        }

        sqlx::query("DELETE FROM cart_items WHERE phone = ?")
            .bind(phone)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(
            "Checked out {} car(s) for {} totalling {}",
            order_ids.len(),
            phone,
            total
        );
        Ok(CheckoutOutcome::Completed { order_ids, total })
    }
}
