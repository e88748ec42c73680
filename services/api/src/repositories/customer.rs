//! Customer repository for database operations

use anyhow::Result;
use chrono::Utc;
use common::models::UserData;
use sqlx::SqlitePool;
use tracing::info;

use super::{hash_password, verify_password};
use crate::models::Customer;

/// Customer repository
#[derive(Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Create a new customer repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a customer; the phone number is the account key
    pub async fn create(&self, name: &str, phone: &str, password: &str) -> Result<UserData> {
        info!("Registering customer: {}", phone);

        let password_hash = hash_password(password)?;

        sqlx::query(
            "INSERT INTO customers (phone, name, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(phone)
        .bind(name)
        .bind(&password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(UserData {
            name: name.to_string(),
            phone: phone.to_string(),
        })
    }

    /// Find a customer by phone number
    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<Customer>> {
        let customer = sqlx::query_as(
            "SELECT phone, name, password_hash, created_at FROM customers WHERE phone = ?",
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Check credentials; `None` when the phone is unknown or the password wrong
    pub async fn authenticate(&self, phone: &str, password: &str) -> Result<Option<Customer>> {
        let Some(customer) = self.find_by_phone(phone).await? else {
            return Ok(None);
        };

        if verify_password(&customer.password_hash, password)? {
            Ok(Some(customer))
        } else {
            Ok(None)
        }
    }
}
