//! Password reset token repository.
//!
//! Token delivery and the actual reset flow live elsewhere; this repo
//! only mints and expires the rows.

use chrono::{Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sqlx::MySqlPool;

use localhub_core::{HubError, Result};

/// Matches the CHAR(40) token column
const TOKEN_LEN: usize = 40;

pub struct PasswordResetRepo<'a> {
    pool: &'a MySqlPool,
}

impl<'a> PasswordResetRepo<'a> {
    pub fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// Issue a reset token for a user, valid for `ttl_hours`.
    ///
    /// Returns the token string. The UNIQUE key on `token` makes a random
    /// collision an error rather than a silent overwrite; at 40
    /// alphanumeric characters that path is effectively unreachable.
    pub async fn issue(&self, user_id: i64, ttl_hours: i64) -> Result<String> {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();
        let expires_at = Utc::now() + Duration::hours(ttl_hours);

        sqlx::query(
            "INSERT INTO password_reset_tokens (user_id, token, expires_at) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(&token)
        .bind(expires_at)
        .execute(self.pool)
        .await
        .map_err(|e| HubError::from_sqlx("password_reset_tokens", e))?;

        Ok(token)
    }

    /// Delete expired tokens. Returns how many were removed.
    pub async fn purge_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM password_reset_tokens WHERE expires_at < NOW()")
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;
    use crate::db::pool::create_pool_from_url;
    use crate::db::repos::UserRepo;
    use crate::models::EmailAddress;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn issued_token_has_expected_shape() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_from_url(&url).await.expect("pool");
        migrations::run(&pool).await.expect("migrations");

        let users = UserRepo::new(&pool);
        let email = EmailAddress::new("reset-shape@example.com").unwrap();
        let user = match users.find_by_email(&email).await {
            Ok(u) => u,
            Err(_) => users.create("Reset Shape", &email).await.expect("user"),
        };

        let token = PasswordResetRepo::new(&pool)
            .issue(user.id, 24)
            .await
            .expect("issue");
        assert_eq!(token.len(), 40);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
