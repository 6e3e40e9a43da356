//! URL slugs for blog posts and templates.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum slug length (matches the VARCHAR(128) columns)
const MAX_SLUG_LEN: usize = 128;

/// Slug pattern: lowercase alphanumeric with single hyphens between runs
static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("invalid slug regex"));

/// Validated URL slug
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Validate a slug.
    ///
    /// # Rules
    /// - Max 128 characters
    /// - Lowercase alphanumeric runs separated by single hyphens
    /// - No leading/trailing hyphens
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "slug" });
        }

        if s.len() > MAX_SLUG_LEN {
            return Err(ValidationError::TooLong {
                field: "slug",
                max: MAX_SLUG_LEN,
            });
        }

        if !SLUG_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "slug",
                reason: "must be lowercase alphanumeric runs separated by hyphens",
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Derive a slug from a free-form title: lowercase, non-alphanumeric
    /// runs collapse to a single hyphen, truncated to the length limit.
    pub fn from_title(title: &str) -> Result<Self, ValidationError> {
        let mut out = String::with_capacity(title.len());
        let mut pending_hyphen = false;

        for ch in title.chars() {
            if ch.is_ascii_alphanumeric() {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(ch.to_ascii_lowercase());
            } else {
                pending_hyphen = true;
            }
        }

        out.truncate(MAX_SLUG_LEN);
        while out.ends_with('-') {
            out.pop();
        }

        Self::new(&out)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_slugs() {
        assert!(Slug::new("spring-market-2024").is_ok());
        assert!(Slug::new("a").is_ok());
        assert!(Slug::new("123-go").is_ok());
    }

    #[test]
    fn rejects_bad_shapes() {
        assert!(Slug::new("Trailing-").is_err());
        assert!(Slug::new("-leading").is_err());
        assert!(Slug::new("double--hyphen").is_err());
        assert!(Slug::new("UPPER").is_err());
        assert!(Slug::new("").is_err());
    }

    #[test]
    fn from_title_collapses_punctuation() {
        let slug = Slug::from_title("Hello, World! (2024)").unwrap();
        assert_eq!(slug.as_str(), "hello-world-2024");
    }

    #[test]
    fn from_title_of_all_punctuation_is_empty_error() {
        let err = Slug::from_title("!!!").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn max_length() {
        let ok = "a".repeat(128);
        assert!(Slug::new(&ok).is_ok());

        let too_long = "a".repeat(129);
        let err = Slug::new(&too_long).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 128, .. }));
    }
}
