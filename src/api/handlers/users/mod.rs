//! User account endpoints: registration, login, and the current-user view.
//!
//! Registration and login are the only unauthenticated endpoints besides
//! `/health`; everything under `/users/current` requires a bearer token.

pub mod current;
pub mod login;
pub mod register;

pub(crate) mod storage;
pub(crate) mod types;

#[cfg(test)]
mod tests;

/// Username, password, and display name all share the same length bound.
pub(crate) const USER_FIELD_MAX: usize = 100;
