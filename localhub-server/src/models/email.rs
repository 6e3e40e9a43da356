//! Email address validation.
//!
//! The database enforces UNIQUE on email columns; this type enforces
//! shape and canonical (lowercase) form before a value reaches SQL.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// RFC 5321 practical limit
const MAX_EMAIL_LEN: usize = 254;

/// Deliberately loose: one '@', no whitespace, a dot in the domain.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email regex"));

/// Validated, lowercased email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and canonicalize an email address.
    ///
    /// Leading/trailing whitespace is trimmed and the address is
    /// lowercased, so `A@B.co` and `a@b.co ` hit the same UNIQUE key.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }

        if s.len() > MAX_EMAIL_LEN {
            return Err(ValidationError::TooLong {
                field: "email",
                max: MAX_EMAIL_LEN,
            });
        }

        if !EMAIL_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must look like user@domain.tld",
            });
        }

        Ok(Self(s.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_addresses() {
        assert!(EmailAddress::new("a@b.co").is_ok());
        assert!(EmailAddress::new("first.last+tag@example.org").is_ok());
    }

    #[test]
    fn canonicalizes_case_and_whitespace() {
        let email = EmailAddress::new("  Alice@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn rejects_missing_at() {
        let err = EmailAddress::new("not-an-email").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn rejects_whitespace_inside() {
        assert!(EmailAddress::new("a b@c.co").is_err());
    }

    #[test]
    fn rejects_empty() {
        let err = EmailAddress::new("   ").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn rejects_overlong() {
        let long = format!("{}@example.com", "a".repeat(250));
        let err = EmailAddress::new(&long).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { .. }));
    }
}
