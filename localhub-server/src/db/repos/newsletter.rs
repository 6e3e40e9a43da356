//! Newsletter subscriber repository.

use sqlx::MySqlPool;

use localhub_core::{HubError, Result};

use crate::models::EmailAddress;

pub struct NewsletterRepo<'a> {
    pool: &'a MySqlPool,
}

impl<'a> NewsletterRepo<'a> {
    pub fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// Subscribe an email address.
    ///
    /// Returns `true` for a new subscription, `false` if the address was
    /// already on the list — ER_DUP_ENTRY is success here, not an error.
    pub async fn subscribe(&self, email: &EmailAddress) -> Result<bool> {
        let result = sqlx::query("INSERT INTO newsletter_subscribers (email) VALUES (?)")
            .bind(email.as_str())
            .execute(self.pool)
            .await
            .map_err(|e| HubError::from_sqlx("newsletter_subscribers", e));

        match result {
            Ok(_) => Ok(true),
            Err(e) if e.is_duplicate_entry() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Remove a subscription.
    pub async fn unsubscribe(&self, email: &EmailAddress) -> Result<()> {
        let result = sqlx::query("DELETE FROM newsletter_subscribers WHERE email = ?")
            .bind(email.as_str())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(HubError::not_found(
                "newsletter subscriber",
                email.as_str().to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations;
    use crate::db::pool::create_pool_from_url;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn double_subscribe_is_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_from_url(&url).await.expect("pool");
        migrations::run(&pool).await.expect("migrations");

        let repo = NewsletterRepo::new(&pool);
        let email = EmailAddress::new("idempotent@example.com").unwrap();
        let _ = repo.unsubscribe(&email).await;

        assert!(repo.subscribe(&email).await.expect("first"));
        assert!(!repo.subscribe(&email).await.expect("second"));

        repo.unsubscribe(&email).await.expect("cleanup");
    }
}
