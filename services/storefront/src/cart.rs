//! Display projection of the server-side cart

use common::models::CarRecord;
use serde::Serialize;

/// Image shown for cars without a picture
pub const PLACEHOLDER_IMAGE: &str = "🚗";

/// One line of the cart as views render it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub year: String,
    pub price: String,
    pub image: String,
    pub status: Option<String>,
}

impl From<&CarRecord> for CartItem {
    fn from(car: &CarRecord) -> Self {
        Self {
            id: car.id.clone(),
            name: car.display_name(),
            year: car
                .year
                .map(|year| year.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
            price: format!("₹{}", car.price.unwrap_or(0)),
            image: car
                .image
                .clone()
                .filter(|image| !image.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            status: car.status.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_record() {
        let car = CarRecord {
            id: "car-42".to_string(),
            make: Some("Toyota".to_string()),
            model: Some("Corolla".to_string()),
            year: Some(2019),
            price: Some(800000),
            image: Some("/static/uploads/corolla.jpg".to_string()),
            status: Some("available".to_string()),
            ..Default::default()
        };

        assert_eq!(
            CartItem::from(&car),
            CartItem {
                id: "car-42".to_string(),
                name: "Toyota Corolla".to_string(),
                year: "2019".to_string(),
                price: "₹800000".to_string(),
                image: "/static/uploads/corolla.jpg".to_string(),
                status: Some("available".to_string()),
            }
        );
    }

    #[test]
    fn test_sparse_record() {
        let car = CarRecord {
            id: "car-7".to_string(),
            make: Some("Honda".to_string()),
            ..Default::default()
        };

        let item = CartItem::from(&car);
        assert_eq!(item.name, "Honda");
        assert_eq!(item.year, "N/A");
        assert_eq!(item.price, "₹0");
        assert_eq!(item.image, PLACEHOLDER_IMAGE);
        assert_eq!(item.status, None);
    }
}
