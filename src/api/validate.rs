//! Pure field-level validation predicates.
//!
//! Each request type declares a `validate()` built from these helpers; they
//! are side-effect-free and run before any store access. Failures surface as
//! the generic `Validation error` body, never field-level detail.

use regex::Regex;

/// A required string field: non-empty and at most `max` characters.
pub fn required_str(value: &str, max: usize) -> bool {
    !value.is_empty() && value.chars().count() <= max
}

/// An optional string field: absent is fine, present must be non-empty and
/// at most `max` characters.
pub fn optional_str(value: Option<&str>, max: usize) -> bool {
    value.map_or(true, |value| required_str(value, max))
}

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

/// Numeric identifiers must be positive.
pub fn positive_id(id: i32) -> bool {
    id >= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_str() {
        assert!(required_str("test", 100));
        assert!(!required_str("", 100));
        assert!(required_str(&"a".repeat(100), 100));
        assert!(!required_str(&"a".repeat(101), 100));
        // multi-byte characters count as one
        assert!(required_str(&"ü".repeat(100), 100));
    }

    #[test]
    fn test_optional_str() {
        assert!(optional_str(None, 100));
        assert!(optional_str(Some("test"), 100));
        assert!(!optional_str(Some(""), 100));
        assert!(!optional_str(Some(&"a".repeat(21)), 20));
    }

    #[test]
    fn test_valid_email() {
        assert!(valid_email("test@example.com"));
        assert!(valid_email("a@b.co"));
        assert!(!valid_email("test"));
        assert!(!valid_email("test@example"));
        assert!(!valid_email("te st@example.com"));
        assert!(!valid_email("@example.com"));
    }

    #[test]
    fn test_positive_id() {
        assert!(positive_id(1));
        assert!(positive_id(i32::MAX));
        assert!(!positive_id(0));
        assert!(!positive_id(-1));
    }
}
