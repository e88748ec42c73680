//! Inventory records

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Raw car record as stored and served by the API.
///
/// Every attribute but the id is optional: inventory rows are edited by
/// hand in the back office and clients must tolerate gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct CarRecord {
    pub id: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i64>,
    pub price: Option<i64>,
    pub mileage: Option<i64>,
    pub fuel: Option<String>,
    pub transmission: Option<String>,
    pub owner: Option<String>,
    #[serde(rename = "type")]
    pub car_type: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl CarRecord {
    /// "Make Model", skipping whichever part is missing
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.make.as_deref().unwrap_or(""),
            self.model.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }

    pub fn is_available(&self) -> bool {
        self.status.as_deref() == Some("available")
    }
}

/// Body of `POST /cart/add` and `POST /cart/remove`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemRequest {
    pub car_id: String,
}

/// Body returned when the back office creates or edits a car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarResponse {
    pub message: String,
    pub car: CarRecord,
}

/// New inventory entry created from the back office
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewCar {
    pub make: String,
    pub model: String,
    pub year: i64,
    pub price: i64,
    pub mileage: i64,
    pub fuel: String,
    pub transmission: String,
    pub owner: String,
    #[serde(rename = "type")]
    pub car_type: String,
    pub image: String,
    pub description: String,
    pub status: String,
}

impl Default for NewCar {
    fn default() -> Self {
        Self {
            make: String::new(),
            model: String::new(),
            year: 2020,
            price: 0,
            mileage: 0,
            fuel: "Petrol".to_string(),
            transmission: "Manual".to_string(),
            owner: "1st Owner".to_string(),
            car_type: "sedan".to_string(),
            image: String::new(),
            description: String::new(),
            status: "available".to_string(),
        }
    }
}

/// Partial inventory update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub car_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
