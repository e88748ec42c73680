//! Sell requests, service bookings and contact messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Customer offer to sell a car to the showroom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellRequest {
    pub owner_name: String,
    pub phone: String,
    pub make: String,
    pub model: String,
    pub year: i64,
    pub asking_price: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Workshop booking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub owner_name: String,
    pub phone: String,
    #[serde(default)]
    pub car_id: Option<String>,
    #[serde(default)]
    pub service_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Message left through the contact form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Stored sell request
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SellRequestRecord {
    pub request_id: String,
    pub owner_name: String,
    pub phone: String,
    pub make: String,
    pub model: String,
    pub year: i64,
    pub asking_price: i64,
    pub notes: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Stored service booking
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceBookingRecord {
    pub service_id: String,
    pub owner_name: String,
    pub phone: String,
    pub car_id: String,
    pub service_date: String,
    pub notes: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Stored contact message
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContactRecord {
    pub contact_id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Body of the back-office status updates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}
