//! Server-side models: stored accounts, sessions and request extensions
//!
//! The payloads exchanged with clients live in `common::models`.

use chrono::{DateTime, Utc};
use common::models::{EmployeeData, UserData};
use serde::Deserialize;
use sqlx::FromRow;

/// Customer row, including the password hash
#[derive(Debug, Clone, FromRow)]
pub struct Customer {
    pub phone: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn user_data(&self) -> UserData {
        UserData {
            name: self.name.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Employee row, including the password hash
#[derive(Debug, Clone, FromRow)]
pub struct Employee {
    pub username: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Employee {
    pub fn employee_data(&self) -> EmployeeData {
        EmployeeData {
            username: self.username.clone(),
            name: self.name.clone(),
        }
    }
}

/// Stored session; `subject` is the customer phone or employee username
#[derive(Debug, Clone, FromRow)]
pub struct StoredSession {
    pub token: String,
    pub subject: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Customer resolved from the session cookie, inserted by the middleware
#[derive(Debug, Clone)]
pub struct CurrentCustomer {
    pub token: String,
    pub user: UserData,
}

/// Employee resolved from the session cookie, inserted by the middleware
#[derive(Debug, Clone)]
pub struct CurrentEmployee {
    pub token: String,
    pub employee: EmployeeData,
}

/// Query parameters of `GET /cars`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarQuery {
    #[serde(rename = "type")]
    pub car_type: Option<String>,
}

impl CarQuery {
    /// The type filter, or `None` when every car is wanted
    pub fn type_filter(&self) -> Option<&str> {
        self.car_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty() && !t.eq_ignore_ascii_case("all"))
    }
}
