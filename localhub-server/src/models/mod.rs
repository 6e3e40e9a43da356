//! Validated domain types shared by routes and repositories.

pub mod directory;
pub mod email;
pub mod pagination;
pub mod slug;
pub mod validation;

pub use directory::DirectoryKind;
pub use email::EmailAddress;
pub use pagination::{Paginated, Pagination, PaginationParams};
pub use slug::Slug;
pub use validation::ValidationError;
