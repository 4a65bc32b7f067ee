use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

pub const UNKNOWN_USER: &str = "Unknown user";
pub const EMAIL_TAKEN: &str = "This email has already been taken!";
pub const PASSWORD_MISMATCH: &str = "Please make sure your password match!";
pub const PASSWORD_INCORRECT: &str = "Password is incorrect!";
pub const PASSWORD_UNCHANGED: &str =
    "Please make sure your password is different than your old one!";
pub const CREATE_FAILED: &str = "Failed to create user";
pub const UPDATE_FAILED: &str = "Failed to update user";
pub const PASSWORD_UPDATE_FAILED: &str = "Failed to update password";
pub const DELETE_FAILED: &str = "Failed to delete user";

#[derive(Debug, Error)]
pub enum UserError {
    /// Unknown user, or a write the store reports as matching nothing
    #[error("{0}")]
    UnprocessableEntity(String),

    #[error("{0}")]
    EmailAlreadyTaken(String),

    #[error("{0}")]
    InvalidPassword(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub fn unprocessable(message: &str) -> Self {
        Self::UnprocessableEntity(message.to_string())
    }

    pub fn invalid_password(message: &str) -> Self {
        Self::InvalidPassword(message.to_string())
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UnprocessableEntity(msg) => AppError::UnprocessableEntity(msg),
            UserError::EmailAlreadyTaken(msg) => AppError::EmailAlreadyTaken(msg),
            UserError::InvalidPassword(msg) => AppError::InvalidPassword(msg),
            UserError::Database(msg) => AppError::Database(msg),
            UserError::PasswordHash(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}
