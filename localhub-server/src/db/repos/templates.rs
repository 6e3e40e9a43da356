//! Template metadata repository.
//!
//! Rows describe where a template's HTML lives under the static root;
//! generating the HTML itself is out of scope.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySqlPool};

use localhub_core::{HubError, Result};

use crate::models::Slug;

/// Template metadata row
#[derive(Debug, Clone, FromRow)]
pub struct Template {
    pub id: i64,
    pub name: String,
    pub path: String,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

pub struct TemplateRepo<'a> {
    pool: &'a MySqlPool,
}

impl<'a> TemplateRepo<'a> {
    pub fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &Slug, path: &str, description: Option<&str>) -> Result<Template> {
        sqlx::query("INSERT INTO templates (name, path, description) VALUES (?, ?, ?)")
            .bind(name.as_str())
            .bind(path)
            .bind(description)
            .execute(self.pool)
            .await
            .map_err(|e| HubError::from_sqlx("templates", e))?;

        self.get(name.as_str()).await
    }

    pub async fn get(&self, name: &str) -> Result<Template> {
        sqlx::query_as::<_, Template>(
            "SELECT id, name, path, description, updated_at FROM templates WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| HubError::not_found("template", name.to_owned()))
    }

    pub async fn list(&self) -> Result<Vec<Template>> {
        let templates = sqlx::query_as::<_, Template>(
            "SELECT id, name, path, description, updated_at FROM templates ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(templates)
    }

    pub async fn update(&self, name: &str, path: &str, description: Option<&str>) -> Result<Template> {
        self.get(name).await?;

        sqlx::query("UPDATE templates SET path = ?, description = ? WHERE name = ?")
            .bind(path)
            .bind(description)
            .bind(name)
            .execute(self.pool)
            .await
            .map_err(|e| HubError::from_sqlx("templates", e))?;

        self.get(name).await
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM templates WHERE name = ?")
            .bind(name)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(HubError::not_found("template", name.to_owned()));
        }
        Ok(())
    }
}
