//! Authenticated self-service endpoints under `/users/current`.

use axum::{extract::Extension, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;
use tracing::debug;

use super::storage::{clear_token, update_user as update_user_record};
use super::types::{UpdateUserRequest, UserResponse};
use crate::api::handlers::auth::password::hash_password;
use crate::api::handlers::auth::require_auth;
use crate::api::response::{ApiError, WebResponse};

#[utoipa::path(
    get,
    path = "/users/current",
    responses(
        (status = 200, description = "Return the authenticated user.", body = UserResponse),
        (status = 401, description = "Missing or invalid bearer token."),
    ),
    tag = "users"
)]
/// Returns the user resolved from the bearer token; no further lookup.
pub async fn get_user(
    headers: HeaderMap,
    pool: Extension<PgPool>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_auth(&headers, &pool).await?;

    Ok((
        StatusCode::OK,
        Json(WebResponse::data(UserResponse {
            username: user.username,
            name: user.name,
            token: None,
        })),
    ))
}

#[utoipa::path(
    patch,
    path = "/users/current",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated.", body = UserResponse),
        (status = 400, description = "Invalid payload."),
        (status = 401, description = "Missing or invalid bearer token."),
    ),
    tag = "users"
)]
/// Updates the display name and/or password of the caller.
/// Only provided fields are written; a new password is re-hashed first.
pub async fn update_user(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_auth(&headers, &pool).await?;
    payload.validate()?;

    let password_hash = match payload.password.as_deref() {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    let row = update_user_record(
        &pool,
        &user.username,
        payload.name.as_deref(),
        password_hash.as_deref(),
    )
    .await?;

    debug!("Updated user {}", row.username);

    Ok((
        StatusCode::OK,
        Json(WebResponse::data(UserResponse {
            username: row.username,
            name: row.name,
            token: None,
        })),
    ))
}

#[utoipa::path(
    delete,
    path = "/users/current",
    responses(
        (status = 200, description = "Token cleared."),
        (status = 401, description = "Missing or invalid bearer token."),
    ),
    tag = "users"
)]
/// Logout: clears the stored token so the presented one stops resolving.
pub async fn logout(
    headers: HeaderMap,
    pool: Extension<PgPool>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_auth(&headers, &pool).await?;

    clear_token(&pool, &user.username).await?;

    debug!("User {} logged out", user.username);

    Ok((StatusCode::OK, Json(WebResponse::data(true))))
}
