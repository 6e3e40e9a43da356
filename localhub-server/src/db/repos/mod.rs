//! Repository implementations for database access.
//!
//! Shared patterns:
//! - Parameterized SQL only; table identifiers come from constants
//! - `fetch_optional` + `NotFound` for point lookups
//! - Unique-constraint violations classified via `HubError::from_sqlx`,
//!   never pre-checked with SELECT
//! - List calls return a page plus a separate COUNT(*) total

pub mod blog;
pub mod businesses;
pub mod directory;
pub mod events;
pub mod newsletter;
pub mod password_reset;
pub mod settings;
pub mod stats;
pub mod templates;
pub mod users;

pub use blog::{BlogPost, BlogRepo};
pub use businesses::{Business, BusinessInput, BusinessRepo};
pub use directory::{DirectoryEntry, DirectoryEntryInput, DirectoryRepo, DuplicateGroup};
pub use events::{Event, EventInput, EventRepo};
pub use newsletter::NewsletterRepo;
pub use password_reset::PasswordResetRepo;
pub use settings::{Setting, SettingsRepo};
pub use stats::{DashboardRepo, DashboardStats};
pub use templates::{Template, TemplateRepo};
pub use users::{User, UserRepo};
