//! Orders, customer profiles and back-office statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::inquiry::{SellRequestRecord, ServiceBookingRecord};

/// Body of a successful `POST /cart/checkout`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub message: String,
    #[serde(default)]
    pub order_ids: Vec<String>,
    #[serde(default)]
    pub total: i64,
}

/// Order as shown to the customer who placed it
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderRecord {
    pub order_id: String,
    pub car_id: String,
    pub car_name: String,
    pub year: Option<i64>,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

/// Order as listed in the back office
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SaleRecord {
    pub order_id: String,
    pub car_id: String,
    pub car_name: String,
    pub phone: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

/// Customer identity with registration date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUser {
    pub name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

/// Everything a customer has done with the showroom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user: ProfileUser,
    pub orders: Vec<OrderRecord>,
    pub sell_requests: Vec<SellRequestRecord>,
    pub services: Vec<ServiceBookingRecord>,
}

/// Back-office dashboard counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DashboardStats {
    pub total_cars: i64,
    pub available_cars: i64,
    pub total_sales: i64,
    pub revenue: i64,
    pub pending_sell_requests: i64,
    pub scheduled_services: i64,
    pub contacts: i64,
}
