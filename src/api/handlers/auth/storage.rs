//! Database helpers for token resolution.

use sqlx::{PgPool, Row};
use tracing::Instrument;

use super::principal::AuthUser;

/// Look up the user whose stored token equals the presented one.
pub(super) async fn lookup_user_by_token(
    pool: &PgPool,
    token: &str,
) -> Result<Option<AuthUser>, sqlx::Error> {
    let query = "SELECT username, name FROM users WHERE token = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(token)
        .fetch_optional(pool)
        .instrument(span)
        .await?;

    Ok(row.map(|row| AuthUser {
        username: row.get("username"),
        name: row.get("name"),
    }))
}
