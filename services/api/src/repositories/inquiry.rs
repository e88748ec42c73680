//! Sell requests, service bookings and contact messages

use anyhow::Result;
use chrono::Utc;
use common::models::{
    ContactRecord, ContactRequest, SellRequest, SellRequestRecord, ServiceBookingRecord,
    ServiceRequest,
};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

const SELL_COLUMNS: &str = "request_id, owner_name, phone, make, model, year, asking_price, \
                            notes, status, created_at";
const SERVICE_COLUMNS: &str =
    "service_id, owner_name, phone, car_id, service_date, notes, status, created_at";

/// Repository for customer-submitted forms
#[derive(Clone)]
pub struct InquiryRepository {
    pool: SqlitePool,
}

impl InquiryRepository {
    /// Create a new inquiry repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store a sell request as `pending`; returns its id
    pub async fn create_sell_request(&self, request: &SellRequest, phone: &str) -> Result<String> {
        let request_id = Uuid::new_v4().to_string();
        info!("Sell request {} for {} {}", request_id, request.make, request.model);

        sqlx::query(
            r#"
            INSERT INTO sell_requests (request_id, owner_name, phone, make, model, year,
                                       asking_price, notes, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'pending', ?)
            "#,
        )
        .bind(&request_id)
        .bind(request.owner_name.trim())
        .bind(phone)
        .bind(&request.make)
        .bind(&request.model)
        .bind(request.year)
        .bind(request.asking_price)
        .bind(request.notes.as_deref().unwrap_or(""))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(request_id)
    }

    /// Store a service booking as `scheduled`; returns its id
    pub async fn create_service_booking(
        &self,
        request: &ServiceRequest,
        phone: &str,
    ) -> Result<String> {
        let service_id = Uuid::new_v4().to_string();
        info!("Service booking {} for {}", service_id, phone);

        sqlx::query(
            r#"
            INSERT INTO service_bookings (service_id, owner_name, phone, car_id, service_date,
                                          notes, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, 'scheduled', ?)
            "#,
        )
        .bind(&service_id)
        .bind(request.owner_name.trim())
        .bind(phone)
        .bind(request.car_id.as_deref().unwrap_or(""))
        .bind(request.service_date.as_deref().unwrap_or(""))
        .bind(request.notes.as_deref().unwrap_or(""))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(service_id)
    }

    /// Store a contact message; returns its id
    pub async fn create_contact(&self, request: &ContactRequest) -> Result<String> {
        let contact_id = Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO contacts (contact_id, name, email, message, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&contact_id)
        .bind(request.name.trim())
        .bind(request.email.trim())
        .bind(&request.message)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(contact_id)
    }

    /// All sell requests, newest first
    pub async fn sell_requests(&self) -> Result<Vec<SellRequestRecord>> {
        let requests = sqlx::query_as(&format!(
            "SELECT {SELL_COLUMNS} FROM sell_requests ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Sell requests submitted with the given phone number
    pub async fn sell_requests_for(&self, phone: &str) -> Result<Vec<SellRequestRecord>> {
        let requests = sqlx::query_as(&format!(
            "SELECT {SELL_COLUMNS} FROM sell_requests WHERE phone = ? ORDER BY created_at DESC"
        ))
        .bind(phone)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// All service bookings, newest first
    pub async fn service_bookings(&self) -> Result<Vec<ServiceBookingRecord>> {
        let bookings = sqlx::query_as(&format!(
            "SELECT {SERVICE_COLUMNS} FROM service_bookings ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Service bookings made with the given phone number
    pub async fn service_bookings_for(&self, phone: &str) -> Result<Vec<ServiceBookingRecord>> {
        let bookings = sqlx::query_as(&format!(
            "SELECT {SERVICE_COLUMNS} FROM service_bookings WHERE phone = ? ORDER BY created_at DESC"
        ))
        .bind(phone)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// All contact messages, newest first
    pub async fn contacts(&self) -> Result<Vec<ContactRecord>> {
        let contacts = sqlx::query_as(
            "SELECT contact_id, name, email, message, created_at FROM contacts ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }

    /// Move a sell request to a new status; false if the id is unknown
    pub async fn set_sell_request_status(&self, request_id: &str, status: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE sell_requests SET status = ? WHERE request_id = ?")
            .bind(status)
            .bind(request_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Move a service booking to a new status; false if the id is unknown
    pub async fn set_service_status(&self, service_id: &str, status: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE service_bookings SET status = ? WHERE service_id = ?")
            .bind(status)
            .bind(service_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
