//! Error handling - every failure renders as `{ "error": "<message>" }`.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use taps_shared::ErrorResponse;

use taps_core::error::{DomainError, RepoError};

/// Application-level error type. Each variant maps to exactly one status code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing, empty or malformed query parameters.
    #[error("Invalid request parameters")]
    MissingParameters,

    /// A query parameter was supplied more than once.
    #[error("Query parameters should not be arrays")]
    RepeatedParameters,

    #[error("Maximum {limit} requests per {window_minutes} minutes reached - please try again later.")]
    RateLimited {
        limit: u32,
        window_minutes: u64,
        retry_after_secs: u64,
    },

    #[error("Invalid API key")]
    InvalidCredential,

    #[error("Invalid interval format")]
    InvalidInterval,

    #[error("Invalid dates")]
    InvalidDates,

    /// Details are logged, never returned to the caller.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingParameters | AppError::RepeatedParameters => StatusCode::BAD_REQUEST,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::InvalidCredential => StatusCode::UNAUTHORIZED,
            AppError::InvalidInterval | AppError::InvalidDates => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());

        let error = match self {
            AppError::MissingParameters => ErrorResponse::invalid_parameters(),
            AppError::RepeatedParameters => ErrorResponse::repeated_parameters(),
            AppError::RateLimited {
                retry_after_secs, ..
            } => {
                builder.insert_header(("Retry-After", retry_after_secs.to_string()));
                ErrorResponse::new(self.to_string())
            }
            AppError::InvalidCredential => ErrorResponse::invalid_api_key(),
            AppError::InvalidInterval => ErrorResponse::invalid_interval(),
            AppError::InvalidDates => ErrorResponse::invalid_dates(),
            AppError::Internal(detail) => {
                tracing::error!("Request failed: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        builder.json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidInterval(_) => AppError::InvalidInterval,
            DomainError::InvalidDate(_) => AppError::InvalidDates,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::MissingParameters.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidCredential.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Internal("db down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_rate_limited_response_carries_retry_after() {
        let err = AppError::RateLimited {
            limit: 100,
            window_minutes: 60,
            retry_after_secs: 3600,
        };

        let response = err.error_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get("Retry-After").unwrap(), "3600");
        assert_eq!(
            err.to_string(),
            "Maximum 100 requests per 60 minutes reached - please try again later."
        );
    }
}
