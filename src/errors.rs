// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Every failure a handler can run into. Endpoint handlers turn
/// these into an in-body `error` field; only request decoding failures go
/// through `ResponseError` and get a non-200 status.
#[derive(Error, Debug)]
pub enum TravelError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    /// Provider failure reported to callers with a fixed, caller-facing message
    #[error("{0}")]
    Upstream(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("{0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// In-body error payload shared by the endpoints that only report `{ error }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<TravelError> for ErrorBody {
    fn from(err: TravelError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for TravelError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TravelError::ExternalApiError(format!("Request timed out: {}", err))
        } else {
            TravelError::ExternalApiError(format!("Request failed: {}", err))
        }
    }
}

/// Convert TravelError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for TravelError {
    fn error_response(&self) -> HttpResponse {
        let error_code = match self {
            TravelError::InvalidInput(_) => "INVALID_INPUT",
            TravelError::ValidationError(_) => "VALIDATION_ERROR",
            TravelError::ExternalApiError(_) => "EXTERNAL_API_ERROR",
            TravelError::Upstream(_) => "UPSTREAM_ERROR",
            TravelError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            TravelError::NotFound(_) => "NOT_FOUND",
            TravelError::Configuration(_) => "CONFIGURATION_ERROR",
        };

        let body = json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            TravelError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            TravelError::ValidationError(_) => StatusCode::BAD_REQUEST,
            TravelError::ExternalApiError(_) | TravelError::Upstream(_) => StatusCode::BAD_GATEWAY,
            TravelError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            TravelError::NotFound(_) => StatusCode::NOT_FOUND,
            TravelError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
