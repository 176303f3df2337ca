//! Address handlers, two-level-scoped under a contact.
//!
//! Every operation resolves the contact through the caller's ownership
//! chain before any address lookup. A contact miss masks whichever address
//! error would otherwise apply, so a foreign contact id and a nonexistent
//! one are indistinguishable.

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use sqlx::PgPool;
use tracing::debug;

use super::storage::{
    delete_address, fetch_addresses, insert_address, resolve_address, resolve_owned_contact,
    update_address as update_address_row,
};
use super::types::{AddressResponse, CreateAddressRequest, UpdateAddressRequest};
use super::{ADDRESS_NOT_FOUND, CONTACT_NOT_FOUND};
use crate::api::handlers::auth::{require_auth, AuthUser};
use crate::api::response::{ApiError, WebResponse};
use crate::api::validate::positive_id;

/// The shared first stage: the contact must exist and belong to the caller.
async fn check_contact_must_exist(
    pool: &PgPool,
    user: &AuthUser,
    contact_id: i32,
) -> Result<(), ApiError> {
    if !positive_id(contact_id) {
        return Err(ApiError::Validation);
    }
    if resolve_owned_contact(pool, &user.username, contact_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound(CONTACT_NOT_FOUND));
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/contacts/{contact_id}/addresses",
    request_body = CreateAddressRequest,
    params(("contact_id" = i32, Path, description = "Owning contact id")),
    responses(
        (status = 200, description = "Address created.", body = AddressResponse),
        (status = 400, description = "Invalid payload."),
        (status = 401, description = "Missing or invalid bearer token."),
        (status = 404, description = "Contact not found or owned by someone else."),
    ),
    tag = "addresses"
)]
pub async fn create_address(
    Path(contact_id): Path<i32>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
    Json(payload): Json<CreateAddressRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_auth(&headers, &pool).await?;
    payload.validate()?;
    check_contact_must_exist(&pool, &user, contact_id).await?;

    let row = insert_address(&pool, contact_id, &payload).await?;

    debug!(
        "User {} created address {} under contact {contact_id}",
        user.username, row.id
    );

    Ok((
        StatusCode::OK,
        Json(WebResponse::data(row.into_response())),
    ))
}

#[utoipa::path(
    get,
    path = "/contacts/{contact_id}/addresses/{address_id}",
    params(
        ("contact_id" = i32, Path, description = "Owning contact id"),
        ("address_id" = i32, Path, description = "Address id"),
    ),
    responses(
        (status = 200, description = "Address detail.", body = AddressResponse),
        (status = 401, description = "Missing or invalid bearer token."),
        (status = 404, description = "Contact or address not found."),
    ),
    tag = "addresses"
)]
pub async fn get_address(
    Path((contact_id, address_id)): Path<(i32, i32)>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_auth(&headers, &pool).await?;
    if !positive_id(address_id) {
        return Err(ApiError::Validation);
    }
    check_contact_must_exist(&pool, &user, contact_id).await?;

    let Some(row) = resolve_address(&pool, contact_id, address_id).await? else {
        return Err(ApiError::NotFound(ADDRESS_NOT_FOUND));
    };

    Ok((
        StatusCode::OK,
        Json(WebResponse::data(row.into_response())),
    ))
}

#[utoipa::path(
    put,
    path = "/contacts/{contact_id}/addresses/{address_id}",
    request_body = UpdateAddressRequest,
    params(
        ("contact_id" = i32, Path, description = "Owning contact id"),
        ("address_id" = i32, Path, description = "Address id"),
    ),
    responses(
        (status = 200, description = "Address updated.", body = AddressResponse),
        (status = 400, description = "Invalid payload."),
        (status = 401, description = "Missing or invalid bearer token."),
        (status = 404, description = "Contact or address not found."),
    ),
    tag = "addresses"
)]
/// Two-stage resolution: contact ownership, then address existence under
/// that contact, then the overwrite.
pub async fn update_address(
    Path((contact_id, address_id)): Path<(i32, i32)>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
    Json(payload): Json<UpdateAddressRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_auth(&headers, &pool).await?;
    if !positive_id(address_id) {
        return Err(ApiError::Validation);
    }
    payload.validate()?;
    check_contact_must_exist(&pool, &user, contact_id).await?;

    if resolve_address(&pool, contact_id, address_id).await?.is_none() {
        return Err(ApiError::NotFound(ADDRESS_NOT_FOUND));
    }

    let row = update_address_row(&pool, address_id, &payload).await?;

    debug!(
        "User {} updated address {} under contact {contact_id}",
        user.username, row.id
    );

    Ok((
        StatusCode::OK,
        Json(WebResponse::data(row.into_response())),
    ))
}

#[utoipa::path(
    delete,
    path = "/contacts/{contact_id}/addresses/{address_id}",
    params(
        ("contact_id" = i32, Path, description = "Owning contact id"),
        ("address_id" = i32, Path, description = "Address id"),
    ),
    responses(
        (status = 200, description = "Address deleted."),
        (status = 401, description = "Missing or invalid bearer token."),
        (status = 404, description = "Contact or address not found."),
    ),
    tag = "addresses"
)]
pub async fn remove_address(
    Path((contact_id, address_id)): Path<(i32, i32)>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_auth(&headers, &pool).await?;
    if !positive_id(address_id) {
        return Err(ApiError::Validation);
    }
    check_contact_must_exist(&pool, &user, contact_id).await?;

    if resolve_address(&pool, contact_id, address_id).await?.is_none() {
        return Err(ApiError::NotFound(ADDRESS_NOT_FOUND));
    }

    delete_address(&pool, address_id).await?;

    debug!(
        "User {} removed address {address_id} under contact {contact_id}",
        user.username
    );

    Ok((StatusCode::OK, Json(WebResponse::data(true))))
}

#[utoipa::path(
    get,
    path = "/contacts/{contact_id}/addresses",
    params(("contact_id" = i32, Path, description = "Owning contact id")),
    responses(
        (status = 200, description = "All addresses of the contact.", body = [AddressResponse]),
        (status = 401, description = "Missing or invalid bearer token."),
        (status = 404, description = "Contact not found or owned by someone else."),
    ),
    tag = "addresses"
)]
pub async fn list_addresses(
    Path(contact_id): Path<i32>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_auth(&headers, &pool).await?;
    check_contact_must_exist(&pool, &user, contact_id).await?;

    let rows = fetch_addresses(&pool, contact_id).await?;
    let addresses = rows
        .into_iter()
        .map(super::storage::AddressRow::into_response)
        .collect::<Vec<_>>();

    Ok((StatusCode::OK, Json(WebResponse::data(addresses))))
}
