//! Identifier sanitization
//!
//! Opaque identifiers (user id, strategy id) are expected to be UUIDs and
//! must never reach the persistence boundary malformed. Sanitization is a
//! security control, not just a format check: a bad identifier is reported
//! as invalid rather than passed through.

use uuid::Uuid;

/// Three-way result of sanitizing an identifier
///
/// Empty input is distinct from malformed input: an optional reference that
/// was never set sanitizes to `Empty`, while a non-empty but malformed
/// string sanitizes to `Invalid` and must block or downgrade, per the
/// caller's policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanitizedId {
    /// No value supplied ("" or whitespace)
    Empty,
    /// Non-empty but not a well-formed UUID
    Invalid,
    /// Canonical lowercase hyphenated UUID
    Valid(String),
}

impl SanitizedId {
    /// The canonical id, if one was produced
    pub fn value(&self) -> Option<&str> {
        match self {
            SanitizedId::Valid(id) => Some(id),
            _ => None,
        }
    }
}

/// Sanitize a caller-supplied identifier expected to be a UUID
pub fn sanitize_uuid(raw: &str) -> SanitizedId {
    let raw = raw.trim();

    if raw.is_empty() {
        return SanitizedId::Empty;
    }

    match Uuid::parse_str(raw) {
        Ok(uuid) => SanitizedId::Valid(uuid.hyphenated().to_string()),
        Err(_) => SanitizedId::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_no_value_not_an_error() {
        assert_eq!(sanitize_uuid(""), SanitizedId::Empty);
        assert_eq!(sanitize_uuid("   "), SanitizedId::Empty);
    }

    #[test]
    fn test_malformed_is_invalid() {
        assert_eq!(sanitize_uuid("not-a-uuid"), SanitizedId::Invalid);
        assert_eq!(sanitize_uuid("12345"), SanitizedId::Invalid);
        assert_eq!(
            sanitize_uuid("zzzzzzzz-zzzz-zzzz-zzzz-zzzzzzzzzzzz"),
            SanitizedId::Invalid
        );
    }

    #[test]
    fn test_well_formed_uuid_canonicalizes_lowercase() {
        let sanitized = sanitize_uuid("550E8400-E29B-41D4-A716-446655440000");
        assert_eq!(
            sanitized,
            SanitizedId::Valid("550e8400-e29b-41d4-a716-446655440000".to_string())
        );
    }

    #[test]
    fn test_lowercase_uuid_passes_through() {
        let id = "6fa459ea-ee8a-3ca4-894e-db77e160355e";
        assert_eq!(sanitize_uuid(id), SanitizedId::Valid(id.to_string()));
        assert_eq!(sanitize_uuid(id).value(), Some(id));
    }
}
