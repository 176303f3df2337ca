//! Uniform response envelope and the API error taxonomy.
//!
//! Every endpoint answers with `WebResponse`, success or failure. Domain
//! failures travel as `ApiError` up to this single boundary, which maps each
//! kind to a status code and an `errors` message. Database errors are logged
//! server-side and surfaced as `500` without leaking details.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

/// Wire wrapper `{data, errors, paging}` used by every response.
/// Absent members are omitted from the JSON body, never serialized as null.
#[derive(Debug, Serialize)]
pub struct WebResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

impl<T: Serialize> WebResponse<T> {
    /// Wraps a successful payload.
    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            errors: None,
            paging: None,
        }
    }

    /// Wraps a successful page slice together with its paging metadata.
    pub fn page(data: T, paging: Paging) -> Self {
        Self {
            data: Some(data),
            errors: None,
            paging: Some(paging),
        }
    }

    /// Wraps a failure message. Only the error boundary should build these.
    fn errors(message: &str) -> Self {
        Self {
            data: None,
            errors: Some(message.to_string()),
            paging: None,
        }
    }
}

/// Paging metadata for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Paging {
    pub current_page: i64,
    pub total_page: i64,
    pub size: i64,
}

impl Paging {
    /// Derives paging metadata from the requested page/size and the total
    /// number of matching rows. `total_page` rounds up, so a final partial
    /// page still counts. `size` is validated to be at least 1 upstream.
    #[must_use]
    pub fn new(current_page: i64, size: i64, total: i64) -> Self {
        Self {
            current_page,
            total_page: (total + size - 1) / size,
            size,
        }
    }
}

/// Domain error taxonomy shared by every handler.
///
/// Ownership-lookup misses are always `NotFound`, never a distinct
/// "forbidden" kind, so callers cannot distinguish records owned by other
/// users from records that do not exist.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or out-of-range input. Reported generically, field-level
    /// detail stays in the debug log.
    Validation,
    /// Missing or invalid bearer token, or failed login.
    Unauthorized(&'static str),
    /// Ownership or existence failure.
    NotFound(&'static str),
    /// Duplicate unique key.
    Conflict(&'static str),
    /// Store failure, terminal for the request.
    Database(sqlx::Error),
    /// Password hashing failure.
    PasswordHash,
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            Self::Validation => (StatusCode::BAD_REQUEST, "Validation error"),
            Self::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::Conflict(message) => (StatusCode::BAD_REQUEST, message),
            Self::Database(err) => {
                error!("Database error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            Self::PasswordHash => {
                error!("Password hashing failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (status, Json(WebResponse::<()>::errors(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn envelope_omits_absent_members() {
        let response = WebResponse::data(json!({"username": "test"}));
        let value = to_value(&response).unwrap();
        assert_eq!(value, json!({"data": {"username": "test"}}));
    }

    #[test]
    fn envelope_carries_paging() {
        let response = WebResponse::page(json!([]), Paging::new(2, 1, 1));
        let value = to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "data": [],
                "paging": {"current_page": 2, "total_page": 1, "size": 1}
            })
        );
    }

    #[test]
    fn envelope_errors_only() {
        let response = WebResponse::<()>::errors("Validation error");
        let value = to_value(&response).unwrap();
        assert_eq!(value, json!({"errors": "Validation error"}));
    }

    #[test]
    fn paging_rounds_up() {
        assert_eq!(Paging::new(1, 10, 0).total_page, 0);
        assert_eq!(Paging::new(1, 10, 1).total_page, 1);
        assert_eq!(Paging::new(1, 10, 10).total_page, 1);
        assert_eq!(Paging::new(1, 10, 11).total_page, 2);
        assert_eq!(Paging::new(2, 1, 1).total_page, 1);
    }
}
