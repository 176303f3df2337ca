//! Request/response types for contacts and addresses.
//!
//! Optional fields absent from a payload stay absent downstream: they are
//! written as NULL and omitted from responses, never serialized as null.

use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use super::{
    CITY_MAX, COUNTRY_MAX, EMAIL_MAX, NAME_MAX, PHONE_MAX, POSTAL_CODE_MAX, PROVINCE_MAX,
    STREET_MAX,
};
use crate::api::response::ApiError;
use crate::api::validate::{optional_str, required_str, valid_email};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateContactRequest {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CreateContactRequest {
    pub(super) fn validate(&self) -> Result<(), ApiError> {
        validate_contact_fields(
            &self.first_name,
            self.last_name.as_deref(),
            self.email.as_deref(),
            self.phone.as_deref(),
        )
    }
}

/// `PUT` semantics: every mutable field is overwritten, absent optionals
/// become NULL.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateContactRequest {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UpdateContactRequest {
    pub(super) fn validate(&self) -> Result<(), ApiError> {
        validate_contact_fields(
            &self.first_name,
            self.last_name.as_deref(),
            self.email.as_deref(),
            self.phone.as_deref(),
        )
    }
}

fn validate_contact_fields(
    first_name: &str,
    last_name: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<(), ApiError> {
    if required_str(first_name, NAME_MAX)
        && optional_str(last_name, NAME_MAX)
        && optional_str(email, EMAIL_MAX)
        && email.map_or(true, valid_email)
        && optional_str(phone, PHONE_MAX)
    {
        Ok(())
    } else {
        debug!("Invalid contact payload");
        Err(ApiError::Validation)
    }
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

/// Search criteria. All provided criteria are ANDed; each one is a
/// case-insensitive substring match, with `name` checked against the first
/// OR last name.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchContactsQuery {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_size")]
    pub size: i64,
}

impl SearchContactsQuery {
    pub(super) fn validate(&self) -> Result<(), ApiError> {
        if self.page >= 1
            && self.size >= 1
            && optional_str(self.name_criterion(), NAME_MAX)
            && optional_str(self.email_criterion(), EMAIL_MAX)
            && optional_str(self.phone_criterion(), PHONE_MAX)
        {
            Ok(())
        } else {
            debug!("Invalid contact search criteria");
            Err(ApiError::Validation)
        }
    }

    // Blank criteria behave as absent, `?name=` filters nothing.
    pub(super) fn name_criterion(&self) -> Option<&str> {
        self.name.as_deref().filter(|value| !value.is_empty())
    }

    pub(super) fn email_criterion(&self) -> Option<&str> {
        self.email.as_deref().filter(|value| !value.is_empty())
    }

    pub(super) fn phone_criterion(&self) -> Option<&str> {
        self.phone.as_deref().filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    pub id: i32,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAddressRequest {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

impl CreateAddressRequest {
    pub(super) fn validate(&self) -> Result<(), ApiError> {
        validate_address_fields(
            self.street.as_deref(),
            self.city.as_deref(),
            self.province.as_deref(),
            &self.country,
            &self.postal_code,
        )
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAddressRequest {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

impl UpdateAddressRequest {
    pub(super) fn validate(&self) -> Result<(), ApiError> {
        validate_address_fields(
            self.street.as_deref(),
            self.city.as_deref(),
            self.province.as_deref(),
            &self.country,
            &self.postal_code,
        )
    }
}

fn validate_address_fields(
    street: Option<&str>,
    city: Option<&str>,
    province: Option<&str>,
    country: &str,
    postal_code: &str,
) -> Result<(), ApiError> {
    if optional_str(street, STREET_MAX)
        && optional_str(city, CITY_MAX)
        && optional_str(province, PROVINCE_MAX)
        && required_str(country, COUNTRY_MAX)
        && required_str(postal_code, POSTAL_CODE_MAX)
    {
        Ok(())
    } else {
        debug!("Invalid address payload");
        Err(ApiError::Validation)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddressResponse {
    pub id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_request() -> CreateContactRequest {
        CreateContactRequest {
            first_name: "test".to_string(),
            last_name: Some("test".to_string()),
            email: Some("test@example.com".to_string()),
            phone: Some("9999".to_string()),
        }
    }

    #[test]
    fn contact_accepts_valid_payload() {
        assert!(contact_request().validate().is_ok());
    }

    #[test]
    fn contact_accepts_required_only() {
        let request = CreateContactRequest {
            first_name: "test".to_string(),
            last_name: None,
            email: None,
            phone: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn contact_rejects_empty_first_name() {
        let mut request = contact_request();
        request.first_name = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn contact_rejects_bad_email() {
        let mut request = contact_request();
        request.email = Some("not-an-email".to_string());
        assert!(request.validate().is_err());
    }

    #[test]
    fn contact_rejects_overlong_phone() {
        let mut request = contact_request();
        request.phone = Some("9".repeat(21));
        assert!(request.validate().is_err());
    }

    #[test]
    fn search_defaults_apply() {
        let query: SearchContactsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.size, 10);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn search_blank_criteria_behave_as_absent() {
        let query = SearchContactsQuery {
            name: Some(String::new()),
            email: Some(String::new()),
            phone: Some(String::new()),
            page: 1,
            size: 10,
        };
        assert!(query.validate().is_ok());
        assert!(query.name_criterion().is_none());
        assert!(query.email_criterion().is_none());
        assert!(query.phone_criterion().is_none());
    }

    #[test]
    fn search_rejects_non_positive_paging() {
        let query = SearchContactsQuery {
            name: None,
            email: None,
            phone: None,
            page: 0,
            size: 10,
        };
        assert!(query.validate().is_err());

        let query = SearchContactsQuery {
            name: None,
            email: None,
            phone: None,
            page: 1,
            size: 0,
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn address_requires_country_and_postal_code() {
        let request = CreateAddressRequest {
            street: None,
            city: None,
            province: None,
            country: String::new(),
            postal_code: "1111".to_string(),
        };
        assert!(request.validate().is_err());

        let request = CreateAddressRequest {
            street: None,
            city: None,
            province: None,
            country: "test".to_string(),
            postal_code: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn address_accepts_optional_fields_absent() {
        let request = CreateAddressRequest {
            street: None,
            city: None,
            province: None,
            country: "test".to_string(),
            postal_code: "1111".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn address_rejects_overlong_postal_code() {
        let request = CreateAddressRequest {
            street: None,
            city: None,
            province: None,
            country: "test".to_string(),
            postal_code: "1".repeat(11),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn responses_omit_absent_optionals() {
        let response = ContactResponse {
            id: 1,
            first_name: "test".to_string(),
            last_name: None,
            email: None,
            phone: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value, serde_json::json!({"id": 1, "first_name": "test"}));

        let response = AddressResponse {
            id: 1,
            street: None,
            city: None,
            province: None,
            country: "test".to_string(),
            postal_code: "1111".to_string(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 1, "country": "test", "postal_code": "1111"})
        );
    }
}
