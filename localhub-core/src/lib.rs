//! localhub-core: shared configuration and error types
//!
//! Everything the server and CLI crates have in common lives here:
//! environment-driven configuration (`DB_*`, `JWT_SECRET`, bind address)
//! and the `HubError` taxonomy that classifies MySQL driver errors.

pub mod config;
pub mod error;

pub use config::{AppConfig, DbConfig};
pub use error::{HubError, Result};
