//! The showroom API as seen by the storefront
//!
//! [`ShowroomApi`] covers the customer endpoints and [`BackOfficeApi`] the
//! employee ones. [`crate::http::HttpShowroom`] implements both over HTTP;
//! tests substitute recording fakes.

use async_trait::async_trait;
use common::models::{
    AuthResponse, CarRecord, CarResponse, CarUpdate, CheckoutResponse, ContactRecord,
    ContactRequest, DashboardStats, EmployeeAuthResponse, EmployeeData, EmployeeLoginRequest,
    LoginRequest, MessageResponse, NewCar, Profile, RegisterRequest, SaleRecord, SellRequest,
    SellRequestRecord, ServiceBookingRecord, ServiceRequest, SocialLinks, UserData,
};

use crate::error::ClientResult;

/// Customer endpoints of the showroom API
#[async_trait]
pub trait ShowroomApi: Send + Sync {
    /// `GET /user`; `Ok(None)` when there is no live session
    async fn current_user(&self) -> ClientResult<Option<UserData>>;

    async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse>;

    async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse>;

    async fn logout(&self) -> ClientResult<MessageResponse>;

    async fn cart(&self) -> ClientResult<Vec<CarRecord>>;

    async fn add_to_cart(&self, car_id: &str) -> ClientResult<MessageResponse>;

    async fn remove_from_cart(&self, car_id: &str) -> ClientResult<MessageResponse>;

    async fn checkout(&self) -> ClientResult<CheckoutResponse>;

    /// `GET /cars`, optionally filtered by body type
    async fn cars(&self, car_type: Option<&str>) -> ClientResult<Vec<CarRecord>>;

    async fn submit_sell_request(&self, request: &SellRequest) -> ClientResult<MessageResponse>;

    async fn book_service(&self, request: &ServiceRequest) -> ClientResult<MessageResponse>;

    async fn send_contact(&self, request: &ContactRequest) -> ClientResult<MessageResponse>;

    async fn profile(&self) -> ClientResult<Profile>;

    /// `GET /settings/social-links`, public
    async fn social_links(&self) -> ClientResult<SocialLinks>;
}

/// Employee endpoints of the showroom API
#[async_trait]
pub trait BackOfficeApi: Send + Sync {
    async fn employee_login(
        &self,
        request: &EmployeeLoginRequest,
    ) -> ClientResult<EmployeeAuthResponse>;

    /// `GET /employee/check`; `Ok(None)` when there is no live session
    async fn employee_check(&self) -> ClientResult<Option<EmployeeData>>;

    async fn employee_logout(&self) -> ClientResult<MessageResponse>;

    async fn stats(&self) -> ClientResult<DashboardStats>;

    async fn inventory(&self) -> ClientResult<Vec<CarRecord>>;

    async fn add_car(&self, car: &NewCar) -> ClientResult<CarResponse>;

    async fn update_car(&self, id: &str, update: &CarUpdate) -> ClientResult<CarResponse>;

    async fn delete_car(&self, id: &str) -> ClientResult<MessageResponse>;

    async fn sales(&self) -> ClientResult<Vec<SaleRecord>>;

    async fn sell_requests(&self) -> ClientResult<Vec<SellRequestRecord>>;

    async fn set_sell_request_status(&self, id: &str, status: &str)
    -> ClientResult<MessageResponse>;

    async fn services(&self) -> ClientResult<Vec<ServiceBookingRecord>>;

    async fn set_service_status(&self, id: &str, status: &str) -> ClientResult<MessageResponse>;

    async fn contacts(&self) -> ClientResult<Vec<ContactRecord>>;

    /// Admin only; other employees get a 403
    async fn employees(&self) -> ClientResult<Vec<EmployeeData>>;

    async fn save_social_links(&self, links: &SocialLinks) -> ClientResult<MessageResponse>;
}
