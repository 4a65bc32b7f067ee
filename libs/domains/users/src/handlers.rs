use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, EmailAlreadyTakenResponse, InternalServerErrorResponse,
        InvalidPasswordResponse, UnprocessableEntityResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{
    CreateUser, CreatedUser, UpdatePassword, UpdateUser, UserId, UserResponse,
};
use crate::password::PasswordHasher;
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_users,
        create_user,
        get_user,
        update_user,
        patch_user,
        change_password,
        delete_user,
    ),
    components(
        schemas(UserResponse, CreateUser, CreatedUser, UpdateUser, UpdatePassword, UserId),
        responses(
            UnprocessableEntityResponse,
            EmailAlreadyTakenResponse,
            InvalidPasswordResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "User account management")
    )
)]
pub struct ApiDoc;

type SharedService<R, H> = State<Arc<UserService<R, H>>>;

/// Users router; nest it under the path users live at, e.g. `/users`
pub fn router<R, H>(service: UserService<R, H>) -> Router
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{id}",
            get(get_user)
                .put(update_user)
                .patch(patch_user)
                .delete(delete_user),
        )
        .route("/{id}/password", put(change_password))
        .with_state(Arc::new(service))
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository, H: PasswordHasher>(
    State(service): SharedService<R, H>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 200, description = "User created", body = CreatedUser),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = InvalidPasswordResponse),
        (status = 409, response = EmailAlreadyTakenResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository, H: PasswordHasher>(
    State(service): SharedService<R, H>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<Json<CreatedUser>> {
    let created = service.create_user(input).await?;
    Ok(Json(created))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository, H: PasswordHasher>(
    State(service): SharedService<R, H>,
    Path(id): Path<String>,
) -> UserResult<Json<UserResponse>> {
    let user = service.get_user(&id).await?;
    Ok(Json(user))
}

/// Replace a user's name and email
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserId),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = EmailAlreadyTakenResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository, H: PasswordHasher>(
    State(service): SharedService<R, H>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Json<UserId>> {
    let updated = service.update_user(&id, input).await?;
    Ok(Json(updated))
}

/// Update a user's name and email (same body as PUT)
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserId),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = EmailAlreadyTakenResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn patch_user<R: UserRepository, H: PasswordHasher>(
    state: SharedService<R, H>,
    path: Path<String>,
    body: ValidatedJson<UpdateUser>,
) -> UserResult<Json<UserId>> {
    update_user(state, path, body).await
}

/// Change a user's password
#[utoipa::path(
    put,
    path = "/{id}/password",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdatePassword,
    responses(
        (status = 200, description = "Password changed", body = UserId),
        (status = 403, response = InvalidPasswordResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn change_password<R: UserRepository, H: PasswordHasher>(
    State(service): SharedService<R, H>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdatePassword>,
) -> UserResult<Json<UserId>> {
    let changed = service.change_password(&id, input).await?;
    Ok(Json(changed))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = UserId),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository, H: PasswordHasher>(
    State(service): SharedService<R, H>,
    Path(id): Path<String>,
) -> UserResult<Json<UserId>> {
    let deleted = service.delete_user(&id).await?;
    Ok(Json(deleted))
}
