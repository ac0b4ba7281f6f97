//! Error body returned by every failing endpoint.

use serde::{Deserialize, Serialize};

/// `{ "error": "<message>" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    // Common error constructors
    pub fn invalid_parameters() -> Self {
        Self::new("Invalid request parameters")
    }

    pub fn repeated_parameters() -> Self {
        Self::new("Query parameters should not be arrays")
    }

    pub fn invalid_api_key() -> Self {
        Self::new("Invalid API key")
    }

    pub fn invalid_interval() -> Self {
        Self::new("Invalid interval format")
    }

    pub fn invalid_dates() -> Self {
        Self::new("Invalid dates")
    }

    pub fn internal_error() -> Self {
        Self::new("Internal server error")
    }
}
