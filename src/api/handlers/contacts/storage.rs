//! Shared SQL storage helpers for contacts and addresses.
//!
//! `resolve_owned_contact` is the single ownership gate: every contact and
//! address operation goes through it, so a new endpoint cannot skip the
//! check. Rows come back in insertion (primary key) order.

use sqlx::{PgPool, Row};
use tracing::Instrument;

use super::types::{
    AddressResponse, ContactResponse, CreateAddressRequest, CreateContactRequest,
    SearchContactsQuery, UpdateAddressRequest, UpdateContactRequest,
};

#[derive(Debug)]
pub(super) struct ContactRow {
    pub(super) id: i32,
    pub(super) first_name: String,
    pub(super) last_name: Option<String>,
    pub(super) email: Option<String>,
    pub(super) phone: Option<String>,
}

impl ContactRow {
    /// Converts the row into its wire view; NULL optionals are dropped.
    pub(super) fn into_response(self) -> ContactResponse {
        ContactResponse {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
        }
    }
}

#[derive(Debug)]
pub(super) struct AddressRow {
    pub(super) id: i32,
    pub(super) street: Option<String>,
    pub(super) city: Option<String>,
    pub(super) province: Option<String>,
    pub(super) country: String,
    pub(super) postal_code: String,
}

impl AddressRow {
    pub(super) fn into_response(self) -> AddressResponse {
        AddressResponse {
            id: self.id,
            street: self.street,
            city: self.city,
            province: self.province,
            country: self.country,
            postal_code: self.postal_code,
        }
    }
}

fn contact_from_row(row: &sqlx::postgres::PgRow) -> ContactRow {
    ContactRow {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        phone: row.get("phone"),
    }
}

fn address_from_row(row: &sqlx::postgres::PgRow) -> AddressRow {
    AddressRow {
        id: row.get("id"),
        street: row.get("street"),
        city: row.get("city"),
        province: row.get("province"),
        country: row.get("country"),
        postal_code: row.get("postal_code"),
    }
}

/// Inserts a contact owned by `username` and returns the fresh row.
pub(super) async fn insert_contact(
    pool: &PgPool,
    username: &str,
    request: &CreateContactRequest,
) -> Result<ContactRow, sqlx::Error> {
    let query = r"
        INSERT INTO contacts (username, first_name, last_name, email, phone)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, first_name, last_name, email, phone
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(username)
        .bind(&request.first_name)
        .bind(request.last_name.as_deref())
        .bind(request.email.as_deref())
        .bind(request.phone.as_deref())
        .fetch_one(pool)
        .instrument(span)
        .await?;

    Ok(contact_from_row(&row))
}

/// Resolves a contact by id scoped to its owner. `None` covers both a
/// missing id and an id owned by someone else, so callers can only answer
/// `404`.
pub(super) async fn resolve_owned_contact(
    pool: &PgPool,
    username: &str,
    contact_id: i32,
) -> Result<Option<ContactRow>, sqlx::Error> {
    let query = r"
        SELECT id, first_name, last_name, email, phone
        FROM contacts
        WHERE id = $1 AND username = $2
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(contact_id)
        .bind(username)
        .fetch_optional(pool)
        .instrument(span)
        .await?;

    Ok(row.map(|row| contact_from_row(&row)))
}

/// Overwrites every mutable contact field. The caller must have resolved
/// ownership first; this function trusts `contact_id`.
pub(super) async fn update_contact(
    pool: &PgPool,
    contact_id: i32,
    request: &UpdateContactRequest,
) -> Result<ContactRow, sqlx::Error> {
    let query = r"
        UPDATE contacts
        SET first_name = $1, last_name = $2, email = $3, phone = $4
        WHERE id = $5
        RETURNING id, first_name, last_name, email, phone
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(&request.first_name)
        .bind(request.last_name.as_deref())
        .bind(request.email.as_deref())
        .bind(request.phone.as_deref())
        .bind(contact_id)
        .fetch_one(pool)
        .instrument(span)
        .await?;

    Ok(contact_from_row(&row))
}

/// Deletes a contact; its addresses go with it via the cascade.
pub(super) async fn delete_contact(pool: &PgPool, contact_id: i32) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM contacts WHERE id = $1")
        .bind(contact_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Runs the search with ANDed, case-insensitive contains-criteria and
/// returns the page slice in insertion order plus the total match count.
pub(super) async fn search_contacts(
    pool: &PgPool,
    username: &str,
    criteria: &SearchContactsQuery,
) -> Result<(Vec<ContactRow>, i64), sqlx::Error> {
    let name = criteria.name_criterion().map(contains_pattern);
    let email = criteria.email_criterion().map(contains_pattern);
    let phone = criteria.phone_criterion().map(contains_pattern);

    let filter = r"
        FROM contacts
        WHERE username = $1
          AND ($2::text IS NULL OR first_name ILIKE $2 OR last_name ILIKE $2)
          AND ($3::text IS NULL OR email ILIKE $3)
          AND ($4::text IS NULL OR phone ILIKE $4)
    ";

    let count_query = format!("SELECT COUNT(*) AS total {filter}");
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = count_query.as_str()
    );
    let total: i64 = sqlx::query(&count_query)
        .bind(username)
        .bind(name.as_deref())
        .bind(email.as_deref())
        .bind(phone.as_deref())
        .fetch_one(pool)
        .instrument(span)
        .await?
        .get("total");

    let page_query = format!(
        r"
        SELECT id, first_name, last_name, email, phone
        {filter}
        ORDER BY id
        LIMIT $5 OFFSET $6
        "
    );
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = page_query.as_str()
    );
    let rows = sqlx::query(&page_query)
        .bind(username)
        .bind(name.as_deref())
        .bind(email.as_deref())
        .bind(phone.as_deref())
        .bind(criteria.size)
        .bind(page_offset(criteria.page, criteria.size))
        .fetch_all(pool)
        .instrument(span)
        .await?;

    Ok((
        rows.iter().map(contact_from_row).collect::<Vec<_>>(),
        total,
    ))
}

/// Row offset for a 1-based page. Saturates instead of overflowing on
/// absurd page numbers; a past-the-end offset just yields an empty page.
fn page_offset(page: i64, size: i64) -> i64 {
    (page - 1).saturating_mul(size)
}

/// Wraps a criterion into an `ILIKE` contains-pattern, escaping the LIKE
/// metacharacters so user input always matches literally.
fn contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Inserts an address under a contact. Ownership of the contact must have
/// been resolved by the caller.
pub(super) async fn insert_address(
    pool: &PgPool,
    contact_id: i32,
    request: &CreateAddressRequest,
) -> Result<AddressRow, sqlx::Error> {
    let query = r"
        INSERT INTO addresses (contact_id, street, city, province, country, postal_code)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, street, city, province, country, postal_code
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(contact_id)
        .bind(request.street.as_deref())
        .bind(request.city.as_deref())
        .bind(request.province.as_deref())
        .bind(&request.country)
        .bind(&request.postal_code)
        .fetch_one(pool)
        .instrument(span)
        .await?;

    Ok(address_from_row(&row))
}

/// Resolves an address by id scoped to its contact; `None` is a `404`.
pub(super) async fn resolve_address(
    pool: &PgPool,
    contact_id: i32,
    address_id: i32,
) -> Result<Option<AddressRow>, sqlx::Error> {
    let query = r"
        SELECT id, street, city, province, country, postal_code
        FROM addresses
        WHERE id = $1 AND contact_id = $2
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(address_id)
        .bind(contact_id)
        .fetch_optional(pool)
        .instrument(span)
        .await?;

    Ok(row.map(|row| address_from_row(&row)))
}

/// Overwrites every mutable address field. The caller resolves the
/// two-stage ownership chain first.
pub(super) async fn update_address(
    pool: &PgPool,
    address_id: i32,
    request: &UpdateAddressRequest,
) -> Result<AddressRow, sqlx::Error> {
    let query = r"
        UPDATE addresses
        SET street = $1, city = $2, province = $3, country = $4, postal_code = $5
        WHERE id = $6
        RETURNING id, street, city, province, country, postal_code
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(request.street.as_deref())
        .bind(request.city.as_deref())
        .bind(request.province.as_deref())
        .bind(&request.country)
        .bind(&request.postal_code)
        .bind(address_id)
        .fetch_one(pool)
        .instrument(span)
        .await?;

    Ok(address_from_row(&row))
}

pub(super) async fn delete_address(pool: &PgPool, address_id: i32) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM addresses WHERE id = $1")
        .bind(address_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Lists every address of a contact in insertion order.
pub(super) async fn fetch_addresses(
    pool: &PgPool,
    contact_id: i32,
) -> Result<Vec<AddressRow>, sqlx::Error> {
    let query = r"
        SELECT id, street, city, province, country, postal_code
        FROM addresses
        WHERE contact_id = $1
        ORDER BY id
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let rows = sqlx::query(query)
        .bind(contact_id)
        .fetch_all(pool)
        .instrument(span)
        .await?;

    Ok(rows.iter().map(address_from_row).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_pattern_wraps_needle() {
        assert_eq!(contains_pattern("es"), "%es%");
    }

    #[test]
    fn page_offset_saturates_instead_of_overflowing() {
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(2, 10), 10);
        assert_eq!(page_offset(i64::MAX, 10), i64::MAX);
    }

    #[test]
    fn contains_pattern_escapes_metacharacters() {
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn rows_convert_to_responses() {
        let row = ContactRow {
            id: 7,
            first_name: "test".to_string(),
            last_name: None,
            email: Some("test@example.com".to_string()),
            phone: None,
        };
        let response = row.into_response();
        assert_eq!(response.id, 7);
        assert_eq!(response.email.as_deref(), Some("test@example.com"));
        assert!(response.last_name.is_none());
    }
}
