//! Directory listing kinds.
//!
//! The three directory tables are a closed set. Table names only ever
//! come from `DirectoryKind::table()`, so no user-supplied string can
//! reach SQL identifier position.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::ValidationError;

/// Which directory a listing belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryKind {
    Members,
    Partners,
    Businesses,
}

impl DirectoryKind {
    /// Every kind, in the order reports display them.
    pub const ALL: [DirectoryKind; 3] = [Self::Members, Self::Partners, Self::Businesses];

    /// Backing table name (constant, never user input).
    pub fn table(self) -> &'static str {
        match self {
            Self::Members => "directory_members",
            Self::Partners => "directory_partners",
            Self::Businesses => "directory_businesses",
        }
    }

    /// URL path segment, as in `/api/directory/{kind}`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Members => "members",
            Self::Partners => "partners",
            Self::Businesses => "businesses",
        }
    }

    /// Parse a path segment into a kind.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "members" => Ok(Self::Members),
            "partners" => Ok(Self::Partners),
            "businesses" => Ok(Self::Businesses),
            other => Err(ValidationError::InvalidVariant {
                field: "directory kind",
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for DirectoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DirectoryKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips() {
        for kind in DirectoryKind::ALL {
            assert_eq!(DirectoryKind::parse(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn tables_are_prefixed() {
        for kind in DirectoryKind::ALL {
            assert!(kind.table().starts_with("directory_"));
        }
    }

    #[test]
    fn unknown_kind_rejected() {
        let err = DirectoryKind::parse("vendors").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidVariant { .. }));
    }
}
