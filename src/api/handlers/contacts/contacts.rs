//! Contact CRUD and search handlers.
//!
//! Every operation is validate → ownership check → one store call → shape.
//! Ownership misses answer `404` so callers cannot learn whether an id
//! exists under another user.

use axum::{
    extract::{Extension, Path, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use sqlx::PgPool;
use tracing::debug;

use super::storage::{
    delete_contact, insert_contact, resolve_owned_contact, search_contacts as search_contact_rows,
    update_contact as update_contact_row,
};
use super::types::{
    ContactResponse, CreateContactRequest, SearchContactsQuery, UpdateContactRequest,
};
use super::CONTACT_NOT_FOUND;
use crate::api::handlers::auth::require_auth;
use crate::api::response::{ApiError, Paging, WebResponse};
use crate::api::validate::positive_id;

#[utoipa::path(
    post,
    path = "/contacts",
    request_body = CreateContactRequest,
    responses(
        (status = 200, description = "Contact created.", body = ContactResponse),
        (status = 400, description = "Invalid payload."),
        (status = 401, description = "Missing or invalid bearer token."),
    ),
    tag = "contacts"
)]
/// Creates a contact owned by the caller and echoes the stored fields.
pub async fn create_contact(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    Json(payload): Json<CreateContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_auth(&headers, &pool).await?;
    payload.validate()?;

    let row = insert_contact(&pool, &user.username, &payload).await?;

    debug!("User {} created contact {}", user.username, row.id);

    Ok((
        StatusCode::OK,
        Json(WebResponse::data(row.into_response())),
    ))
}

#[utoipa::path(
    get,
    path = "/contacts",
    params(SearchContactsQuery),
    responses(
        (status = 200, description = "Page of matching contacts.", body = [ContactResponse]),
        (status = 400, description = "Invalid criteria."),
        (status = 401, description = "Missing or invalid bearer token."),
    ),
    tag = "contacts"
)]
/// Searches the caller's contacts. Criteria are ANDed case-insensitive
/// substring matches; no criteria returns everything the caller owns. The
/// slice comes back in insertion order with paging metadata.
pub async fn search_contacts(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    Query(criteria): Query<SearchContactsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_auth(&headers, &pool).await?;
    criteria.validate()?;

    let (rows, total) = search_contact_rows(&pool, &user.username, &criteria).await?;
    let paging = Paging::new(criteria.page, criteria.size, total);

    let contacts = rows
        .into_iter()
        .map(super::storage::ContactRow::into_response)
        .collect::<Vec<_>>();

    Ok((StatusCode::OK, Json(WebResponse::page(contacts, paging))))
}

#[utoipa::path(
    get,
    path = "/contacts/{contact_id}",
    params(("contact_id" = i32, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact detail.", body = ContactResponse),
        (status = 400, description = "Invalid contact id."),
        (status = 401, description = "Missing or invalid bearer token."),
        (status = 404, description = "Contact not found or owned by someone else."),
    ),
    tag = "contacts"
)]
pub async fn get_contact(
    Path(contact_id): Path<i32>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_auth(&headers, &pool).await?;
    if !positive_id(contact_id) {
        return Err(ApiError::Validation);
    }

    let Some(row) = resolve_owned_contact(&pool, &user.username, contact_id).await? else {
        return Err(ApiError::NotFound(CONTACT_NOT_FOUND));
    };

    Ok((
        StatusCode::OK,
        Json(WebResponse::data(row.into_response())),
    ))
}

#[utoipa::path(
    put,
    path = "/contacts/{contact_id}",
    request_body = UpdateContactRequest,
    params(("contact_id" = i32, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact updated.", body = ContactResponse),
        (status = 400, description = "Invalid payload."),
        (status = 401, description = "Missing or invalid bearer token."),
        (status = 404, description = "Contact not found or owned by someone else."),
    ),
    tag = "contacts"
)]
/// Overwrites all mutable fields of an owned contact.
pub async fn update_contact(
    Path(contact_id): Path<i32>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
    Json(payload): Json<UpdateContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_auth(&headers, &pool).await?;
    if !positive_id(contact_id) {
        return Err(ApiError::Validation);
    }
    payload.validate()?;

    if resolve_owned_contact(&pool, &user.username, contact_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound(CONTACT_NOT_FOUND));
    }

    let row = update_contact_row(&pool, contact_id, &payload).await?;

    debug!("User {} updated contact {}", user.username, row.id);

    Ok((
        StatusCode::OK,
        Json(WebResponse::data(row.into_response())),
    ))
}

#[utoipa::path(
    delete,
    path = "/contacts/{contact_id}",
    params(("contact_id" = i32, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact deleted, addresses cascaded."),
        (status = 400, description = "Invalid contact id."),
        (status = 401, description = "Missing or invalid bearer token."),
        (status = 404, description = "Contact not found or owned by someone else."),
    ),
    tag = "contacts"
)]
/// Deletes an owned contact; its addresses cascade away with it. Repeating
/// the delete answers `404`.
pub async fn remove_contact(
    Path(contact_id): Path<i32>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_auth(&headers, &pool).await?;
    if !positive_id(contact_id) {
        return Err(ApiError::Validation);
    }

    if resolve_owned_contact(&pool, &user.username, contact_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound(CONTACT_NOT_FOUND));
    }

    delete_contact(&pool, contact_id).await?;

    debug!("User {} removed contact {contact_id}", user.username);

    Ok((StatusCode::OK, Json(WebResponse::data(true))))
}
