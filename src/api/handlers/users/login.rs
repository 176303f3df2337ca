//! Login: verify credentials and issue an opaque bearer token.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::storage::{fetch_credentials, store_token};
use super::types::{LoginUserRequest, UserResponse};
use crate::api::handlers::auth::password::verify_password;
use crate::api::response::{ApiError, WebResponse};

/// Unknown usernames and wrong passwords share one message so login cannot
/// be used to probe for accounts.
const LOGIN_FAILED: &str = "Username or password is invalid";

#[utoipa::path(
    post,
    path = "/users/login",
    request_body = LoginUserRequest,
    responses(
        (status = 200, description = "Login succeeded, token issued.", body = UserResponse),
        (status = 400, description = "Invalid payload."),
        (status = 401, description = "Unknown username or wrong password."),
    ),
    tag = "users"
)]
/// Verifies the password and stores a fresh token on the user row.
/// The response is the only place the token ever appears in a body.
pub async fn login(
    pool: Extension<PgPool>,
    Json(payload): Json<LoginUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload.validate()?;

    let Some(record) = fetch_credentials(&pool, &payload.username).await? else {
        return Err(ApiError::Unauthorized(LOGIN_FAILED));
    };

    if !verify_password(&payload.password, &record.password) {
        return Err(ApiError::Unauthorized(LOGIN_FAILED));
    }

    let token = Uuid::new_v4().to_string();
    store_token(&pool, &record.username, &token).await?;

    debug!("User {} logged in", record.username);

    Ok((
        StatusCode::OK,
        Json(WebResponse::data(UserResponse {
            username: record.username,
            name: record.name,
            token: Some(token),
        })),
    ))
}
