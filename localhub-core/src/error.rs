//! Structured error types for LocalHub library crates.
//!
//! Uses `thiserror` for composable errors; the binary crate
//! (localhub-cli) wraps these in `anyhow` at the boundary.
//!
//! Database failures are classified by MySQL error number so callers
//! can decide between "ignore, already exists" and "surface":
//! 1062 ER_DUP_ENTRY, 1060 ER_DUP_FIELDNAME, 1045 ER_ACCESS_DENIED_ERROR.

use std::io;

use sqlx::mysql::MySqlDatabaseError;
use thiserror::Error;

/// MySQL error numbers this application cares about.
pub const ER_DUP_ENTRY: u16 = 1062;
pub const ER_DUP_FIELDNAME: u16 = 1060;
pub const ER_ACCESS_DENIED_ERROR: u16 = 1045;

/// Main error type for LocalHub operations
#[derive(Error, Debug)]
pub enum HubError {
    /// Configuration missing or malformed
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// Unique constraint violated (ER_DUP_ENTRY)
    #[error("Duplicate entry in {table}: {detail}")]
    DuplicateEntry { table: &'static str, detail: String },

    /// Column already exists (ER_DUP_FIELDNAME), seen by idempotent
    /// column migrations
    #[error("Duplicate column: {detail}")]
    DuplicateColumn { detail: String },

    /// Bad database credentials (ER_ACCESS_DENIED_ERROR)
    #[error("Database access denied: {detail}")]
    AccessDenied { detail: String },

    /// Row lookup found nothing
    #[error("Not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Any other database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

/// Result type alias for LocalHub operations
pub type Result<T> = std::result::Result<T, HubError>;

impl HubError {
    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Classify a sqlx error by MySQL error number.
    ///
    /// `table` names the table the statement targeted, so duplicate-entry
    /// errors carry enough context for a 409 body or a seed-skip log line.
    pub fn from_sqlx(table: &'static str, err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if let Some(mysql) = db.try_downcast_ref::<MySqlDatabaseError>() {
                match mysql.number() {
                    ER_DUP_ENTRY => {
                        return Self::DuplicateEntry {
                            table,
                            detail: mysql.message().to_owned(),
                        }
                    }
                    ER_DUP_FIELDNAME => {
                        return Self::DuplicateColumn {
                            detail: mysql.message().to_owned(),
                        }
                    }
                    ER_ACCESS_DENIED_ERROR => {
                        return Self::AccessDenied {
                            detail: mysql.message().to_owned(),
                        }
                    }
                    _ => {}
                }
            }
        }
        Self::Database(err)
    }

    /// True for the ER_DUP_ENTRY branch — callers seeding or subscribing
    /// treat this as "already exists, move on".
    pub fn is_duplicate_entry(&self) -> bool {
        matches!(self, Self::DuplicateEntry { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = HubError::not_found("user", "42");
        assert_eq!(err.to_string(), "Not found: user '42'");

        let err = HubError::config("DB_PORT is not a number");
        assert!(err.to_string().contains("DB_PORT"));
    }

    #[test]
    fn io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let hub_err: HubError = io_err.into();
        assert!(matches!(hub_err, HubError::Io { .. }));
    }

    #[test]
    fn duplicate_entry_predicate() {
        let err = HubError::DuplicateEntry {
            table: "newsletter_subscribers",
            detail: "Duplicate entry 'a@b.co' for key 'email'".into(),
        };
        assert!(err.is_duplicate_entry());
        assert!(!HubError::config("x").is_duplicate_entry());
    }

    #[test]
    fn non_database_sqlx_error_stays_database() {
        let err = HubError::from_sqlx("users", sqlx::Error::RowNotFound);
        assert!(matches!(err, HubError::Database(_)));
    }
}
