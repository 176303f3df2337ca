//! User registration.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;
use tracing::debug;

use super::storage::{insert_user, RegisterOutcome};
use super::types::{RegisterUserRequest, UserResponse};
use crate::api::handlers::auth::password::hash_password;
use crate::api::response::{ApiError, WebResponse};

#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterUserRequest,
    responses(
        (status = 200, description = "User registered.", body = UserResponse),
        (status = 400, description = "Invalid payload or username already registered."),
    ),
    tag = "users"
)]
/// Registers a new user and returns the wire-safe view.
/// The password is stored as an argon2 hash; a taken username maps to `400`
/// rather than `409` so all duplicate-key failures share one kind.
pub async fn register(
    pool: Extension<PgPool>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;

    let password_hash = hash_password(&payload.password)?;

    match insert_user(&pool, &payload.username, &password_hash, &payload.name).await? {
        RegisterOutcome::Created(row) => {
            debug!("Registered user {}", row.username);
            Ok((
                StatusCode::OK,
                Json(WebResponse::data(UserResponse {
                    username: row.username,
                    name: row.name,
                    token: None,
                })),
            ))
        }
        RegisterOutcome::Conflict => Err(ApiError::Conflict("Username already registered")),
    }
}
