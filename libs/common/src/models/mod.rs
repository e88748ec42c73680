//! Wire models shared by the showroom API and its clients
//!
//! Every type here is serialized exactly as the REST API exchanges it, so
//! the server and the storefront client agree on one definition.

pub mod account;
pub mod car;
pub mod inquiry;
pub mod order;
pub mod settings;

pub use account::{
    AuthResponse, EmployeeAuthResponse, EmployeeData, EmployeeLoginRequest, LoginRequest,
    MessageResponse, RegisterRequest, UserData,
};
pub use car::{CarRecord, CarResponse, CarUpdate, CartItemRequest, NewCar};
pub use inquiry::{
    ContactRecord, ContactRequest, SellRequest, SellRequestRecord, ServiceBookingRecord,
    ServiceRequest, StatusUpdate,
};
pub use order::{CheckoutResponse, DashboardStats, OrderRecord, Profile, ProfileUser, SaleRecord};
pub use settings::SocialLinks;
