//! Admin-maintained settings (key/value rows).

use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySqlPool};

use localhub_core::{HubError, Result};

/// Setting row
#[derive(Debug, Clone, FromRow)]
pub struct Setting {
    pub name: String,
    pub value: Option<String>,
    pub updated_at: DateTime<Utc>,
}

pub struct SettingsRepo<'a> {
    pool: &'a MySqlPool,
}

impl<'a> SettingsRepo<'a> {
    pub fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Setting>> {
        let settings = sqlx::query_as::<_, Setting>(
            "SELECT name, value, updated_at FROM settings ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(settings)
    }

    pub async fn get(&self, name: &str) -> Result<Setting> {
        sqlx::query_as::<_, Setting>(
            "SELECT name, value, updated_at FROM settings WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| HubError::not_found("setting", name.to_owned()))
    }

    /// Insert or update a setting in one statement; the UNIQUE key on
    /// `name` drives the upsert.
    pub async fn upsert(&self, name: &str, value: &str) -> Result<Setting> {
        sqlx::query(
            r#"
            INSERT INTO settings (name, value) VALUES (?, ?)
            ON DUPLICATE KEY UPDATE value = VALUES(value)
            "#,
        )
        .bind(name)
        .bind(value)
        .execute(self.pool)
        .await
        .map_err(|e| HubError::from_sqlx("settings", e))?;

        self.get(name).await
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM settings WHERE name = ?")
            .bind(name)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(HubError::not_found("setting", name.to_owned()));
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
    async fn upsert_overwrites_value() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_from_url(&url).await.expect("pool");
        migrations::run(&pool).await.expect("migrations");

        let repo = SettingsRepo::new(&pool);
        repo.upsert("site_title", "LocalHub").await.expect("insert");
        let setting = repo.upsert("site_title", "LocalHub 2").await.expect("update");
        assert_eq!(setting.value.as_deref(), Some("LocalHub 2"));

        repo.delete("site_title").await.expect("cleanup");
    }
}
