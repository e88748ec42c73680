//! reqwest implementation of the showroom API traits

use async_trait::async_trait;
use common::models::{
    AuthResponse, CarRecord, CarResponse, CarUpdate, CartItemRequest, CheckoutResponse,
    ContactRecord, ContactRequest, DashboardStats, EmployeeAuthResponse, EmployeeData,
    EmployeeLoginRequest, LoginRequest, MessageResponse, NewCar, Profile, RegisterRequest,
    SaleRecord, SellRequest, SellRequestRecord, ServiceBookingRecord, ServiceRequest,
    SocialLinks, StatusUpdate, UserData,
};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    backend::{BackOfficeApi, ShowroomApi},
    config::StorefrontConfig,
    error::{ClientError, ClientResult},
};

/// HTTP client of the showroom API.
///
/// Session cookies set by the server are kept in the client's cookie
/// store, so one `HttpShowroom` is one browser-like session.
#[derive(Debug, Clone)]
pub struct HttpShowroom {
    client: Client,
    base: Url,
}

impl HttpShowroom {
    pub fn new(config: &StorefrontConfig) -> ClientResult<Self> {
        let base = parse_base(&config.api_base)?;
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout())
            .build()?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let url = self
            .base
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl(e.to_string()))?;
        Ok(self.client.request(method, url))
    }

    /// Base URL extended by `segments`, each percent-encoded as one segment
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request_at(&self, method: Method, segments: &[&str]) -> ClientResult<RequestBuilder> {
        Ok(self.client.request(method, self.endpoint(segments)?))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        send(self.request(Method::GET, path)?).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        send(self.request(Method::POST, path)?.json(body)).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        send(self.request(Method::POST, path)?).await
    }
}

/// Base URLs are joined against, so they must end with a slash
fn parse_base(api_base: &str) -> ClientResult<Url> {
    let normalized = format!("{}/", api_base.trim().trim_end_matches('/'));
    let url =
        Url::parse(&normalized).map_err(|e| ClientError::InvalidBaseUrl(format!("{api_base}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidBaseUrl(api_base.to_string()));
    }

    Ok(url)
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
    let response = request.send().await?;
    let status = response.status();
    let bytes = response.bytes().await?;

    if status.is_success() {
        return serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()));
    }

    let message = serde_json::from_slice::<MessageResponse>(&bytes)
        .map(|body| body.message)
        .unwrap_or_default();
    debug!("Showroom API answered {}: {}", status, message);

    if status == StatusCode::UNAUTHORIZED {
        Err(ClientError::Unauthorized(message))
    } else {
        Err(ClientError::Rejected { status, message })
    }
}

/// A 401 from a session check means "nobody is logged in", not a failure
fn optional<T>(result: ClientResult<T>) -> ClientResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ClientError::Unauthorized(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

#[async_trait]
impl ShowroomApi for HttpShowroom {
    async fn current_user(&self) -> ClientResult<Option<UserData>> {
        optional(self.get("user").await)
    }

    async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse> {
        self.post("login", request).await
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        self.post("register", request).await
    }

    async fn logout(&self) -> ClientResult<MessageResponse> {
        self.post_empty("logout").await
    }

    async fn cart(&self) -> ClientResult<Vec<CarRecord>> {
        self.get("cart").await
    }

    async fn add_to_cart(&self, car_id: &str) -> ClientResult<MessageResponse> {
        let body = CartItemRequest {
            car_id: car_id.to_string(),
        };
        self.post("cart/add", &body).await
    }

    async fn remove_from_cart(&self, car_id: &str) -> ClientResult<MessageResponse> {
        let body = CartItemRequest {
            car_id: car_id.to_string(),
        };
        self.post("cart/remove", &body).await
    }

    async fn checkout(&self) -> ClientResult<CheckoutResponse> {
        self.post_empty("cart/checkout").await
    }

    async fn cars(&self, car_type: Option<&str>) -> ClientResult<Vec<CarRecord>> {
        let mut request = self.request(Method::GET, "cars")?;
        if let Some(car_type) = car_type {
            request = request.query(&[("type", car_type)]);
        }
        send(request).await
    }

    async fn submit_sell_request(&self, request: &SellRequest) -> ClientResult<MessageResponse> {
        self.post("sell", request).await
    }

    async fn book_service(&self, request: &ServiceRequest) -> ClientResult<MessageResponse> {
        self.post("service", request).await
    }

    async fn send_contact(&self, request: &ContactRequest) -> ClientResult<MessageResponse> {
        self.post("contact", request).await
    }

    async fn profile(&self) -> ClientResult<Profile> {
        self.get("profile").await
    }

    async fn social_links(&self) -> ClientResult<SocialLinks> {
        self.get("settings/social-links").await
    }
}

#[async_trait]
impl BackOfficeApi for HttpShowroom {
    async fn employee_login(
        &self,
        request: &EmployeeLoginRequest,
    ) -> ClientResult<EmployeeAuthResponse> {
        self.post("employee/login", request).await
    }

    async fn employee_check(&self) -> ClientResult<Option<EmployeeData>> {
        optional(self.get("employee/check").await)
    }

    async fn employee_logout(&self) -> ClientResult<MessageResponse> {
        self.post_empty("employee/logout").await
    }

    async fn stats(&self) -> ClientResult<DashboardStats> {
        self.get("employee/stats").await
    }

    async fn inventory(&self) -> ClientResult<Vec<CarRecord>> {
        self.get("employee/cars").await
    }

    async fn add_car(&self, car: &NewCar) -> ClientResult<CarResponse> {
        self.post("employee/cars", car).await
    }

    async fn update_car(&self, id: &str, update: &CarUpdate) -> ClientResult<CarResponse> {
        send(
            self.request_at(Method::PUT, &["employee", "cars", id])?
                .json(update),
        )
        .await
    }

    async fn delete_car(&self, id: &str) -> ClientResult<MessageResponse> {
        send(self.request_at(Method::DELETE, &["employee", "cars", id])?).await
    }

    async fn sales(&self) -> ClientResult<Vec<SaleRecord>> {
        self.get("employee/sales").await
    }

    async fn sell_requests(&self) -> ClientResult<Vec<SellRequestRecord>> {
        self.get("employee/sell-requests").await
    }

    async fn set_sell_request_status(
        &self,
        id: &str,
        status: &str,
    ) -> ClientResult<MessageResponse> {
        let body = StatusUpdate {
            status: status.to_string(),
        };
        let request = self.request_at(Method::PUT, &["employee", "sell-requests", id, "status"])?;
        send(request.json(&body)).await
    }

    async fn services(&self) -> ClientResult<Vec<ServiceBookingRecord>> {
        self.get("employee/services").await
    }

    async fn set_service_status(&self, id: &str, status: &str) -> ClientResult<MessageResponse> {
        let body = StatusUpdate {
            status: status.to_string(),
        };
        let request = self.request_at(Method::PUT, &["employee", "services", id, "status"])?;
        send(request.json(&body)).await
    }

    async fn contacts(&self) -> ClientResult<Vec<ContactRecord>> {
        self.get("employee/contacts").await
    }

    async fn employees(&self) -> ClientResult<Vec<EmployeeData>> {
        self.get("employee/employees").await
    }

    async fn save_social_links(&self, links: &SocialLinks) -> ClientResult<MessageResponse> {
        self.post("employee/social-links", links).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let showroom =
            HttpShowroom::new(&StorefrontConfig::with_api_base("http://localhost:8000/api"))
                .unwrap();
        assert_eq!(showroom.base_url().as_str(), "http://localhost:8000/api/");
        assert_eq!(
            showroom.base_url().join("cart/add").unwrap().as_str(),
            "http://localhost:8000/api/cart/add"
        );
    }

    #[test]
    fn test_rejects_unusable_base() {
        let err = HttpShowroom::new(&StorefrontConfig::with_api_base("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl(_)));

        let err = HttpShowroom::new(&StorefrontConfig::with_api_base("mailto:sales@example.com"))
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_ids_are_escaped_as_one_segment() {
        let showroom =
            HttpShowroom::new(&StorefrontConfig::with_api_base("http://localhost:8000/api"))
                .unwrap();

        let url = showroom.endpoint(&["employee", "cars", "car-1"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/employee/cars/car-1");

        let url = showroom
            .endpoint(&["employee", "services", "../x?y#z", "status"])
            .unwrap();
        assert_eq!(url.path_segments().unwrap().count(), 5);
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/employee/services/..%2Fx%3Fy%23z/status"
        );
    }
}
