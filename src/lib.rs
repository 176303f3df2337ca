//! # Rolodex (Contact Management API)
//!
//! `rolodex` is a REST backend for personal contact management. Users
//! register and log in, then manage contacts and the addresses nested under
//! them.
//!
//! ## Ownership model
//!
//! Every contact belongs to exactly one user and every address belongs to
//! exactly one contact. Each request authenticates with an opaque bearer
//! token and every lookup is scoped by the ownership chain
//! (address → contact → user) back to the caller.
//!
//! Requests that fail the ownership chain return `404 Not Found` rather than
//! `403 Forbidden`, so callers cannot probe for records owned by other
//! users.
//!
//! ## Responses
//!
//! Every endpoint answers with the same envelope:
//! `{ "data": ..., "errors": ..., "paging": ... }`, where absent members are
//! omitted. Search endpoints populate `paging` with the current page, total
//! page count, and page size.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
