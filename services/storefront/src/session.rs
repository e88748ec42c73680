//! Authentication form types

use serde::{Deserialize, Serialize};

/// Which form the auth prompt shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }
}

/// What the user typed into the auth prompt; `name` is only used to register
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub name: String,
    pub phone: String,
    pub password: String,
}

impl Credentials {
    pub fn login(phone: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            phone: phone.into(),
            password: password.into(),
        }
    }

    pub fn register(
        name: impl Into<String>,
        phone: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            password: password.into(),
        }
    }
}
