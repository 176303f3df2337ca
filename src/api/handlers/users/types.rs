//! Request/response types for the user account API.
//!
//! Each request type validates its own shape with the pure predicates in
//! `api::validate` before any store access happens.

use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use super::USER_FIELD_MAX;
use crate::api::response::ApiError;
use crate::api::validate::{optional_str, required_str};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
    pub name: String,
}

impl RegisterUserRequest {
    pub(super) fn validate(&self) -> Result<(), ApiError> {
        if required_str(&self.username, USER_FIELD_MAX)
            && required_str(&self.password, USER_FIELD_MAX)
            && required_str(&self.name, USER_FIELD_MAX)
        {
            Ok(())
        } else {
            debug!("Invalid register payload");
            Err(ApiError::Validation)
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginUserRequest {
    pub username: String,
    pub password: String,
}

impl LoginUserRequest {
    pub(super) fn validate(&self) -> Result<(), ApiError> {
        if required_str(&self.username, USER_FIELD_MAX)
            && required_str(&self.password, USER_FIELD_MAX)
        {
            Ok(())
        } else {
            debug!("Invalid login payload");
            Err(ApiError::Validation)
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    /// An empty patch is fine: it writes nothing and the handler answers
    /// with the unchanged user.
    pub(super) fn validate(&self) -> Result<(), ApiError> {
        if optional_str(self.name.as_deref(), USER_FIELD_MAX)
            && optional_str(self.password.as_deref(), USER_FIELD_MAX)
        {
            Ok(())
        } else {
            debug!("Invalid user update payload");
            Err(ApiError::Validation)
        }
    }
}

/// Wire-safe view of a user. The token is only present right after login;
/// the stored password hash is never exposed.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub username: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_rejects_empty_fields() {
        let request = RegisterUserRequest {
            username: String::new(),
            password: String::new(),
            name: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn register_accepts_valid_payload() {
        let request = RegisterUserRequest {
            username: "test".to_string(),
            password: "test".to_string(),
            name: "test".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn register_rejects_overlong_username() {
        let request = RegisterUserRequest {
            username: "a".repeat(101),
            password: "test".to_string(),
            name: "test".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn update_accepts_empty_patch() {
        let request = UpdateUserRequest {
            name: None,
            password: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn update_accepts_partial_patch() {
        let request = UpdateUserRequest {
            name: Some("updated".to_string()),
            password: None,
        };
        assert!(request.validate().is_ok());

        let request = UpdateUserRequest {
            name: None,
            password: Some("updated".to_string()),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn update_rejects_empty_strings() {
        let request = UpdateUserRequest {
            name: Some(String::new()),
            password: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn user_response_omits_absent_token() {
        let response = UserResponse {
            username: "test".to_string(),
            name: "test".to_string(),
            token: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"username": "test", "name": "test"})
        );
    }
}
