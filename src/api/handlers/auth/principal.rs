//! Authenticated user extraction.
//!
//! Flow Overview: read the bearer token, resolve it to a user row, and
//! return the user for downstream handlers. Ownership scoping happens per
//! resource in those handlers, not globally here.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use sqlx::PgPool;
use tracing::error;

use super::storage::lookup_user_by_token;
use crate::api::response::ApiError;

/// Authenticated user context derived from the bearer token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
    pub name: String,
}

/// Resolve a bearer token into a user, or fail Unauthorized before any
/// handler logic runs. One store lookup per request, no expiry.
pub async fn require_auth(headers: &HeaderMap, pool: &PgPool) -> Result<AuthUser, ApiError> {
    let Some(token) = extract_bearer_token(headers) else {
        return Err(ApiError::Unauthorized("Unauthorized"));
    };

    match lookup_user_by_token(pool, &token).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(ApiError::Unauthorized("Unauthorized")),
        Err(err) => {
            error!("Failed to lookup token: {err}");
            Err(ApiError::Database(err))
        }
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    // Auth schemes compare case-insensitively.
    let (scheme, token) = value.trim().split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let headers = headers_with("Bearer abc123");
        assert_eq!(extract_bearer_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn accepts_any_scheme_case_and_trims() {
        for value in ["  bearer   abc123  ", "BEARER abc123", "BeArEr abc123"] {
            let headers = headers_with(value);
            assert_eq!(
                extract_bearer_token(&headers).as_deref(),
                Some("abc123"),
                "{value:?} should yield the token"
            );
        }
    }

    #[test]
    fn rejects_missing_header() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert_eq!(extract_bearer_token(&headers_with("Basic abc123")), None);
        assert_eq!(extract_bearer_token(&headers_with("Bearer ")), None);
        assert_eq!(extract_bearer_token(&headers_with("abc123")), None);
    }
}
