//! Customer and employee identities and the authentication payloads

use serde::{Deserialize, Serialize};

/// Authenticated customer as exposed to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub name: String,
    pub phone: String,
}

/// Customer login credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

/// Customer registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub phone: String,
    pub password: String,
}

/// Response to a successful login or registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserData,
}

/// Generic `{ "message": ... }` body, used for successes and failures alike
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Employee login credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeLoginRequest {
    pub username: String,
    pub password: String,
}

/// Authenticated employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeData {
    pub username: String,
    pub name: String,
}

/// Response to a successful employee login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeAuthResponse {
    pub message: String,
    pub employee: EmployeeData,
}
