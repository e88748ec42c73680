//! Errors raised while talking to the showroom API

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single call to the showroom API
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced an HTTP response
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    /// The session cookie is missing or expired
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The response body did not have the expected shape
    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// Text to show the user: the server's message when it sent one,
    /// otherwise `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Rejected { message, .. } | ClientError::Unauthorized(message)
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            _ => fallback.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }
}

/// Result type for showroom API calls
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let rejected = ClientError::Rejected {
            status: StatusCode::CONFLICT,
            message: "This car is no longer available".to_string(),
        };
        assert_eq!(
            rejected.user_message("Failed to add to cart"),
            "This car is no longer available"
        );

        let unauthorized = ClientError::Unauthorized("Login required".to_string());
        assert_eq!(unauthorized.user_message("x"), "Login required");
        assert!(unauthorized.is_unauthorized());
    }

    #[test]
    fn test_user_message_falls_back() {
        let blank = ClientError::Rejected {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: String::new(),
        };
        assert_eq!(blank.user_message("Checkout failed"), "Checkout failed");

        let decode = ClientError::Decode("expected value".to_string());
        assert_eq!(decode.user_message("Checkout failed"), "Checkout failed");
        assert!(!decode.is_unauthorized());
    }
}
