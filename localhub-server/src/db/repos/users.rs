//! User repository.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySqlPool};

use localhub_core::{HubError, Result};

use crate::models::{EmailAddress, Paginated, Pagination};

/// User record from database
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a MySqlPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert a user. A duplicate email surfaces as
    /// `HubError::DuplicateEntry` (the UNIQUE key does the checking).
    pub async fn create(&self, name: &str, email: &EmailAddress) -> Result<User> {
        let result = sqlx::query("INSERT INTO users (name, email) VALUES (?, ?)")
            .bind(name)
            .bind(email.as_str())
            .execute(self.pool)
            .await
            .map_err(|e| HubError::from_sqlx("users", e))?;

        self.get(result.last_insert_id() as i64).await
    }

    /// Get a user by id.
    pub async fn get(&self, id: i64) -> Result<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| HubError::not_found("user", id.to_string()))
    }

    /// Look up a user by email (reset-password tooling).
    pub async fn find_by_email(&self, email: &EmailAddress) -> Result<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at FROM users WHERE email = ?",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| HubError::not_found("user", email.as_str().to_owned()))
    }

    /// List users, newest first.
    pub async fn list(&self, page: Pagination) -> Result<Paginated<User>> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;

        let items = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, created_at
            FROM users
            ORDER BY created_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok(Paginated {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Update name and email.
    pub async fn update(&self, id: i64, name: &str, email: &EmailAddress) -> Result<User> {
        // Existence check first so a missing row is a 404, not a silent no-op
        self.get(id).await?;

        sqlx::query("UPDATE users SET name = ?, email = ? WHERE id = ?")
            .bind(name)
            .bind(email.as_str())
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| HubError::from_sqlx("users", e))?;

        self.get(id).await
    }

    /// Delete a user. Cascades to blog posts and reset tokens.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(HubError::not_found("user", id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_pool_from_url;
    use crate::db::migrations;

    // Run with: DATABASE_URL=mysql://... cargo test -p localhub-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_email_is_classified() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_from_url(&url).await.expect("pool");
        migrations::run(&pool).await.expect("migrations");

        let repo = UserRepo::new(&pool);
        let email = EmailAddress::new("dup-check@example.com").unwrap();
        let _ = repo.create("First", &email).await;

        let err = repo.create("Second", &email).await.unwrap_err();
        assert!(err.is_duplicate_entry());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_missing_user_is_not_found() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_from_url(&url).await.expect("pool");
        migrations::run(&pool).await.expect("migrations");

        let err = UserRepo::new(&pool).delete(i64::MAX).await.unwrap_err();
        assert!(matches!(err, HubError::NotFound { .. }));
    }
}
