//! Type-safe error codes for API responses.
//!
//! Each error code carries:
//! - a string identifier for clients (e.g. "EMAIL_ALREADY_TAKEN")
//! - an integer code for logs and monitoring (e.g. 1012)
//! - a default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidPassword;
//! assert_eq!(code.as_str(), "INVALID_PASSWORD");
//! assert_eq!(code.code(), 1013);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request body failed field validation
    ValidationError,

    /// Request body could not be parsed as the expected JSON
    JsonExtraction,

    /// Route or resource does not exist
    NotFound,

    /// Entity is unknown, or a mutation had no effect
    UnprocessableEntity,

    /// Email address already belongs to another account
    EmailAlreadyTaken,

    /// Password check failed (wrong current password, mismatch, reuse)
    InvalidPassword,

    // Server errors
    /// An unexpected internal server error occurred
    InternalError,

    // Storage errors (2000-2999)
    /// The backing store failed to complete an operation
    DatabaseError,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier clients match on.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::UnprocessableEntity => "UNPROCESSABLE_ENTITY",
            Self::EmailAlreadyTaken => "EMAIL_ALREADY_TAKEN",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }

    /// Integer code for structured logs and metrics.
    ///
    /// - 1000-1999: client and generic server errors
    /// - 2000-2999: storage errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::UnprocessableEntity => 1009,
            Self::EmailAlreadyTaken => 1012,
            Self::InvalidPassword => 1013,
            Self::DatabaseError => 2003,
        }
    }

    /// Message used when the caller supplies none.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::UnprocessableEntity => "Request cannot be processed",
            Self::EmailAlreadyTaken => "This email has already been taken!",
            Self::InvalidPassword => "Invalid password",
            Self::InternalError => "An internal server error occurred",
            Self::DatabaseError => "Database error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_string_matches_serde() {
        for code in [
            ErrorCode::ValidationError,
            ErrorCode::UnprocessableEntity,
            ErrorCode::EmailAlreadyTaken,
            ErrorCode::InvalidPassword,
            ErrorCode::DatabaseError,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn test_error_code_integer_codes() {
        assert_eq!(ErrorCode::UnprocessableEntity.code(), 1009);
        assert_eq!(ErrorCode::EmailAlreadyTaken.code(), 1012);
        assert_eq!(ErrorCode::InvalidPassword.code(), 1013);
        assert_eq!(ErrorCode::DatabaseError.code(), 2003);
    }

    #[test]
    fn test_error_code_deserialization() {
        let code: ErrorCode = serde_json::from_str("\"EMAIL_ALREADY_TAKEN\"").unwrap();
        assert_eq!(code, ErrorCode::EmailAlreadyTaken);
    }
}
