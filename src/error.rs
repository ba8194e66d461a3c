//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every failure a caller can observe maps onto one of five kinds: invalid input,
//! unauthorized, not found, duplicate email, or internal.
//!
//! The variants that cross a trust boundary (`Unauthorized`, `NotFound`, `DuplicateEmail`)
//! carry no payload, so the response a client sees is the same no matter which check
//! failed underneath. `Internal` details are logged server-side and replaced by a
//! generic message.
//!
//! `AppError` implements `actix_web::error::ResponseError` to convert application
//! errors into HTTP responses with JSON bodies. `From` implementations for
//! `sqlx::Error`, `validator::ValidationErrors`, `bcrypt::BcryptError` and
//! `actix_web::error::BlockingError` allow easy conversion using the `?` operator.

use actix_web::{error::BlockingError, error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// The request was malformed or failed validation (HTTP 400).
    InvalidInput(String),
    /// Missing, malformed, forged or expired token, or bad login credentials (HTTP 401).
    Unauthorized,
    /// The task does not exist or is not owned by the caller (HTTP 404).
    NotFound,
    /// Registration with an email that is already taken (HTTP 409).
    DuplicateEmail,
    /// Storage or other unexpected failure (HTTP 500).
    Internal(String),
}

impl AppError {
    fn public_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::NotFound => "Task not found".to_string(),
            AppError::DuplicateEmail => "Email already registered".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid Input: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::NotFound => write!(f, "Not Found"),
            AppError::DuplicateEmail => write!(f, "Duplicate Email"),
            AppError::Internal(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            log::error!("internal error: {}", detail);
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.public_message()
        }))
    }
}

/// `RowNotFound` becomes `NotFound`; everything else is an internal failure.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound,
            _ => AppError::Internal(format!("database: {}", error)),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::InvalidInput(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(format!("bcrypt: {}", error))
    }
}

impl From<BlockingError> for AppError {
    fn from(error: BlockingError) -> AppError {
        AppError::Internal(format!("blocking pool: {}", error))
    }
}
