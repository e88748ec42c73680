//! Back-office console over the employee endpoints

use common::models::{
    CarRecord, CarUpdate, ContactRecord, DashboardStats, EmployeeData, EmployeeLoginRequest,
    NewCar, SaleRecord, SellRequestRecord, ServiceBookingRecord, SocialLinks,
};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{backend::BackOfficeApi, error::ClientResult, notify::Confirm};

/// Employee session plus the inventory and request management actions.
///
/// Unlike the storefront, errors are returned to the caller; the console
/// decides how to present them.
pub struct BackOffice<B, C> {
    api: B,
    confirm: C,
    employee: RwLock<Option<EmployeeData>>,
}

impl<B: BackOfficeApi, C: Confirm> BackOffice<B, C> {
    pub fn new(api: B, confirm: C) -> Self {
        Self {
            api,
            confirm,
            employee: RwLock::new(None),
        }
    }

    /// The logged-in employee, if any
    pub async fn employee(&self) -> Option<EmployeeData> {
        self.employee.read().await.clone()
    }

    pub async fn login(&self, username: &str, password: &str) -> ClientResult<EmployeeData> {
        let response = self
            .api
            .employee_login(&EmployeeLoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await?;

        info!("Employee {} logged in", response.employee.username);
        *self.employee.write().await = Some(response.employee.clone());
        Ok(response.employee)
    }

    /// Restore the employee session from the cookie
    pub async fn check(&self) -> ClientResult<Option<EmployeeData>> {
        let employee = self.api.employee_check().await?;
        *self.employee.write().await = employee.clone();
        Ok(employee)
    }

    /// Clears the local session even if the server call fails
    pub async fn logout(&self) {
        if let Err(e) = self.api.employee_logout().await {
            warn!("Employee logout request failed: {}", e);
        }
        *self.employee.write().await = None;
    }

    pub async fn stats(&self) -> ClientResult<DashboardStats> {
        self.api.stats().await
    }

    pub async fn inventory(&self) -> ClientResult<Vec<CarRecord>> {
        self.api.inventory().await
    }

    pub async fn add_car(&self, car: &NewCar) -> ClientResult<CarRecord> {
        Ok(self.api.add_car(car).await?.car)
    }

    pub async fn update_car(&self, id: &str, update: &CarUpdate) -> ClientResult<CarRecord> {
        Ok(self.api.update_car(id, update).await?.car)
    }

    /// Delete a car after the user confirms; `Ok(false)` when declined
    pub async fn delete_car(&self, id: &str) -> ClientResult<bool> {
        if !self.confirm.confirm(&format!("Delete car {}?", id)) {
            return Ok(false);
        }

        self.api.delete_car(id).await?;
        info!("Deleted car {}", id);
        Ok(true)
    }

    pub async fn sales(&self) -> ClientResult<Vec<SaleRecord>> {
        self.api.sales().await
    }

    pub async fn sell_requests(&self) -> ClientResult<Vec<SellRequestRecord>> {
        self.api.sell_requests().await
    }

    pub async fn set_sell_request_status(&self, id: &str, status: &str) -> ClientResult<()> {
        self.api.set_sell_request_status(id, status).await?;
        Ok(())
    }

    pub async fn services(&self) -> ClientResult<Vec<ServiceBookingRecord>> {
        self.api.services().await
    }

    pub async fn set_service_status(&self, id: &str, status: &str) -> ClientResult<()> {
        self.api.set_service_status(id, status).await?;
        Ok(())
    }

    pub async fn contacts(&self) -> ClientResult<Vec<ContactRecord>> {
        self.api.contacts().await
    }

    pub async fn employees(&self) -> ClientResult<Vec<EmployeeData>> {
        self.api.employees().await
    }

    /// Replace the footer links; an empty field removes that link
    pub async fn save_social_links(&self, links: &SocialLinks) -> ClientResult<()> {
        self.api.save_social_links(links).await?;
        info!("Saved social links");
        Ok(())
    }
}
