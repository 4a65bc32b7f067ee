//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 1005,
        "error": "INTERNAL_ERROR",
        "message": "An internal server error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "message": "Request validation failed",
        "details": {
            "email": [{
                "code": "email",
                "message": "must be a valid email address",
                "params": {"value": "not-an-email"}
            }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unprocessable Entity - unknown entity or the change had no effect",
    content_type = "application/json",
    example = json!({
        "code": 1009,
        "error": "UNPROCESSABLE_ENTITY",
        "message": "Unknown user"
    })
)]
pub struct UnprocessableEntityResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - email address already in use",
    content_type = "application/json",
    example = json!({
        "code": 1012,
        "error": "EMAIL_ALREADY_TAKEN",
        "message": "This email has already been taken!"
    })
)]
pub struct EmailAlreadyTakenResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Forbidden - password check failed",
    content_type = "application/json",
    example = json!({
        "code": 1013,
        "error": "INVALID_PASSWORD",
        "message": "Please make sure your password match!"
    })
)]
pub struct InvalidPasswordResponse(pub ErrorResponse);
