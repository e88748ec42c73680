//! Car inventory repository

use anyhow::Result;
use common::models::{CarRecord, CarUpdate, NewCar};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

const CAR_COLUMNS: &str = "id, make, model, year, price, mileage, fuel, transmission, owner, \
                           car_type, image, description, status";

/// Car repository for database operations
#[derive(Clone)]
pub struct CarRepository {
    pool: SqlitePool,
}

impl CarRepository {
    /// Create a new car repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List cars, optionally restricted to one body type (case-insensitive)
    pub async fn list(&self, car_type: Option<&str>) -> Result<Vec<CarRecord>> {
        let cars = match car_type {
            Some(car_type) => {
                sqlx::query_as(&format!(
                    "SELECT {CAR_COLUMNS} FROM cars WHERE LOWER(car_type) = LOWER(?) ORDER BY rowid"
                ))
                .bind(car_type)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as(&format!("SELECT {CAR_COLUMNS} FROM cars ORDER BY rowid"))
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(cars)
    }

    /// Find a car by ID
    pub async fn find(&self, id: &str) -> Result<Option<CarRecord>> {
        let car = sqlx::query_as(&format!("SELECT {CAR_COLUMNS} FROM cars WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    /// Add a car to the inventory
    pub async fn create(&self, car: &NewCar) -> Result<CarRecord> {
        let id = format!("car-{}", &Uuid::new_v4().simple().to_string()[..8]);
        info!("Adding car {} ({} {})", id, car.make, car.model);

        sqlx::query(
            r#"
            INSERT INTO cars (id, make, model, year, price, mileage, fuel, transmission, owner,
                              car_type, image, description, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year)
        .bind(car.price)
        .bind(car.mileage)
        .bind(&car.fuel)
        .bind(&car.transmission)
        .bind(&car.owner)
        .bind(&car.car_type)
        .bind(non_empty(&car.image))
        .bind(&car.description)
        .bind(&car.status)
        .execute(&self.pool)
        .await?;

        self.find(&id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Car {} vanished after insert", id))
    }

    /// Apply a partial update; returns the updated car, or `None` if unknown
    pub async fn update(&self, id: &str, update: &CarUpdate) -> Result<Option<CarRecord>> {
        let result = sqlx::query(
            r#"
            UPDATE cars SET
                make = COALESCE(?, make),
                model = COALESCE(?, model),
                year = COALESCE(?, year),
                price = COALESCE(?, price),
                mileage = COALESCE(?, mileage),
                fuel = COALESCE(?, fuel),
                transmission = COALESCE(?, transmission),
                owner = COALESCE(?, owner),
                car_type = COALESCE(?, car_type),
                image = COALESCE(?, image),
                description = COALESCE(?, description),
                status = COALESCE(?, status)
            WHERE id = ?
            "#,
        )
        .bind(&update.make)
        .bind(&update.model)
        .bind(update.year)
        .bind(update.price)
        .bind(update.mileage)
        .bind(&update.fuel)
        .bind(&update.transmission)
        .bind(&update.owner)
        .bind(&update.car_type)
        .bind(&update.image)
        .bind(&update.description)
        .bind(&update.status)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find(id).await
    }

    /// Remove a car from the inventory
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cars WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Stock an empty showroom with a few sample cars
    pub async fn seed_if_empty(&self) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cars")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            return Ok(0);
        }

        let samples = [
            ("car-1", "Toyota", "Corolla", 2019, 800000, 35000, "sedan"),
            ("car-2", "Honda", "City", 2018, 700000, 42000, "sedan"),
            ("car-3", "Hyundai", "Creta", 2020, 1200000, 22000, "suv"),
        ];

        let mut inserted = 0;
        for (id, make, model, year, price, mileage, car_type) in samples {
            sqlx::query(
                r#"
                INSERT INTO cars (id, make, model, year, price, mileage, car_type, status)
                VALUES (?, ?, ?, ?, ?, ?, ?, 'available')
                "#,
            )
            .bind(id)
            .bind(make)
            .bind(model)
            .bind(year as i64)
            .bind(price as i64)
            .bind(mileage as i64)
            .bind(car_type)
            .execute(&self.pool)
            .await?;
            inserted += 1;
        }

        Ok(inserted)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.is_empty())
}
