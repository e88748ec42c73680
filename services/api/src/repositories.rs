//! Repositories for database operations

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::models::StoredSession;

pub mod car;
pub mod cart;
pub mod customer;
pub mod employee;
pub mod inquiry;
pub mod sale;
pub mod settings;
pub mod stats;

pub use car::CarRepository;
pub use cart::{CartRepository, CheckoutOutcome};
pub use customer::CustomerRepository;
pub use employee::EmployeeRepository;
pub use inquiry::InquiryRepository;
pub use sale::SaleRepository;
pub use settings::SettingsRepository;
pub use stats::StatsRepository;

/// Hash a password with Argon2 and a fresh salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();

    Ok(hash)
}

/// Check a password against a stored Argon2 hash
pub fn verify_password(password_hash: &str, password: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Which population a session table serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Customer,
    Employee,
}

impl SessionKind {
    fn table(self) -> &'static str {
        match self {
            SessionKind::Customer => "customer_sessions",
            SessionKind::Employee => "employee_sessions",
        }
    }
}

/// Session repository for database operations
#[derive(Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
    kind: SessionKind,
    ttl: Duration,
}

impl SessionRepository {
    /// Create a new session repository; sessions live for `ttl_hours`
    pub fn new(pool: SqlitePool, kind: SessionKind, ttl_hours: i64) -> Self {
        Self {
            pool,
            kind,
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Open a session for `subject` and return its token
    pub async fn create(&self, subject: &str) -> Result<String> {
        let token = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(&format!(
            "INSERT INTO {} (token, subject, created_at, expires_at) VALUES (?, ?, ?, ?)",
            self.kind.table()
        ))
        .bind(&token)
        .bind(subject)
        .bind(now)
        .bind(now + self.ttl)
        .execute(&self.pool)
        .await?;

        info!("Opened {:?} session for {}", self.kind, subject);
        Ok(token)
    }

    /// Resolve a token to its subject; expired sessions are removed
    pub async fn find_subject(&self, token: &str) -> Result<Option<String>> {
        let session: Option<StoredSession> = sqlx::query_as(&format!(
            "SELECT token, subject, created_at, expires_at FROM {} WHERE token = ?",
            self.kind.table()
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        match session {
            Some(session) if session.expires_at > Utc::now() => Ok(Some(session.subject)),
            Some(session) => {
                self.delete(&session.token).await?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Delete a session by token
    pub async fn delete(&self, token: &str) -> Result<bool> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE token = ?", self.kind.table()))
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove every expired session, returning how many were dropped
    pub async fn delete_expired(&self) -> Result<u64> {
        let sessions: Vec<StoredSession> = sqlx::query_as(&format!(
            "SELECT token, subject, created_at, expires_at FROM {}",
            self.kind.table()
        ))
        .fetch_all(&self.pool)
        .await?;

        let now = Utc::now();
        let mut removed = 0;
        for session in sessions.iter().filter(|s| s.expires_at <= now) {
            if self.delete(&session.token).await? {
                removed += 1;
            }
        }

        Ok(removed)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use common::database::{DatabaseConfig, init_pool, migrate};
    use sqlx::SqlitePool;

    /// Fresh migrated in-memory database
    pub async fn pool() -> SqlitePool {
        let pool = init_pool(&DatabaseConfig::in_memory()).await.unwrap();
        migrate(&pool).await.unwrap();
        pool
    }
}
