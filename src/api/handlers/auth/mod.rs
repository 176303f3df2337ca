//! Bearer-token authentication.
//!
//! Login stores an opaque token on the user row; every protected endpoint
//! resolves `Authorization: Bearer <token>` back to that row with a single
//! lookup. There is no session table and no expiry; logout clears the token.

pub(crate) mod password;
pub(crate) mod principal;
pub(crate) mod storage;

pub(crate) use self::principal::{require_auth, AuthUser};
