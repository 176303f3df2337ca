//! Database helpers for user accounts.
//!
//! Handlers own validation and password hashing; these functions only touch
//! the `users` table and translate constraint failures into outcomes the
//! handlers can map to API errors.

use sqlx::{PgPool, Row};
use tracing::Instrument;

/// Outcome when attempting to create a new user row.
#[derive(Debug)]
pub(super) enum RegisterOutcome {
    Created(UserRow),
    Conflict,
}

/// Wire-relevant user fields, without the password hash.
#[derive(Debug)]
pub(super) struct UserRow {
    pub(super) username: String,
    pub(super) name: String,
}

/// Fields needed to verify a login attempt.
pub(super) struct CredentialRow {
    pub(super) username: String,
    pub(super) name: String,
    pub(super) password: String,
}

/// Insert a new user. A duplicate username maps to `Conflict` via the
/// primary-key unique violation (SQLSTATE 23505).
pub(super) async fn insert_user(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
    name: &str,
) -> Result<RegisterOutcome, sqlx::Error> {
    let query = r"
        INSERT INTO users (username, password, name)
        VALUES ($1, $2, $3)
        RETURNING username, name
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(username)
        .bind(password_hash)
        .bind(name)
        .fetch_one(pool)
        .instrument(span)
        .await;

    match row {
        Ok(row) => Ok(RegisterOutcome::Created(UserRow {
            username: row.get("username"),
            name: row.get("name"),
        })),
        Err(err) => {
            if is_unique_violation(&err) {
                Ok(RegisterOutcome::Conflict)
            } else {
                Err(err)
            }
        }
    }
}

/// Look up login data by username.
pub(super) async fn fetch_credentials(
    pool: &PgPool,
    username: &str,
) -> Result<Option<CredentialRow>, sqlx::Error> {
    let query = "SELECT username, name, password FROM users WHERE username = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(username)
        .fetch_optional(pool)
        .instrument(span)
        .await?;

    Ok(row.map(|row| CredentialRow {
        username: row.get("username"),
        name: row.get("name"),
        password: row.get("password"),
    }))
}

/// Persist a freshly issued session token on the user row.
pub(super) async fn store_token(
    pool: &PgPool,
    username: &str,
    token: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET token = $1 WHERE username = $2")
        .bind(token)
        .bind(username)
        .execute(pool)
        .await?;
    Ok(())
}

/// Clear the session token on logout.
pub(super) async fn clear_token(pool: &PgPool, username: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET token = NULL WHERE username = $1")
        .bind(username)
        .execute(pool)
        .await?;
    Ok(())
}

/// Update only the provided fields and return the fresh row.
pub(super) async fn update_user(
    pool: &PgPool,
    username: &str,
    name: Option<&str>,
    password_hash: Option<&str>,
) -> Result<UserRow, sqlx::Error> {
    let query = r"
        UPDATE users
        SET
            name = COALESCE($1, name),
            password = COALESCE($2, password)
        WHERE username = $3
        RETURNING username, name
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(name)
        .bind(password_hash)
        .bind(username)
        .fetch_one(pool)
        .instrument(span)
        .await?;

    Ok(UserRow {
        username: row.get("username"),
        name: row.get("name"),
    })
}

/// Returns `true` when `err` is a database unique-violation (SQLSTATE `23505`).
fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
