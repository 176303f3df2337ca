//! Contact and address endpoints.
//!
//! Contacts belong to users, addresses belong to contacts. Every handler
//! resolves ownership through `storage::resolve_owned_contact` before
//! touching anything below it; an ownership miss is indistinguishable from a
//! missing record (`404`, never `403`).

pub mod addresses;
pub mod contacts;

pub(crate) mod storage;
pub(crate) mod types;

#[cfg(test)]
mod tests;

pub(crate) const NAME_MAX: usize = 100;
pub(crate) const EMAIL_MAX: usize = 100;
pub(crate) const PHONE_MAX: usize = 20;

pub(crate) const STREET_MAX: usize = 255;
pub(crate) const CITY_MAX: usize = 100;
pub(crate) const PROVINCE_MAX: usize = 100;
pub(crate) const COUNTRY_MAX: usize = 100;
pub(crate) const POSTAL_CODE_MAX: usize = 10;

pub(crate) const CONTACT_NOT_FOUND: &str = "Contact is not found";
pub(crate) const ADDRESS_NOT_FOUND: &str = "Address is not found";
